use serde::{Deserialize, Serialize};

/// Learner profile tracked for program progress and webinar attendance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub program: String,
    pub progress: u8,
    pub status: TraineeStatus,
    pub webinars_attended: u32,
    pub total_webinars: u32,
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub attended_webinars: Vec<AttendedWebinar>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraineeStatus {
    Active,
    Inactive,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendedWebinar {
    pub id: String,
    pub title: String,
    pub date: String,
    pub presenter: String,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// Colour band of a progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTier {
    High,
    Medium,
    Low,
}

impl ProgressTier {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            p if p >= 80 => ProgressTier::High,
            p if p >= 40 => ProgressTier::Medium,
            _ => ProgressTier::Low,
        }
    }
}

impl Trainee {
    pub fn progress_tier(&self) -> ProgressTier {
        ProgressTier::from_progress(self.progress)
    }

    /// Headline shown under the name: job title, else the program
    pub fn headline(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.program)
    }

    /// Avatar fallback letter
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

impl TraineeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraineeStatus::Active => "active",
            TraineeStatus::Inactive => "inactive",
            TraineeStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TraineeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TraineeStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TraineeStatus::Active),
            "inactive" => Ok(TraineeStatus::Inactive),
            "completed" => Ok(TraineeStatus::Completed),
            _ => Err(anyhow::anyhow!("Invalid trainee status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tiers() {
        assert_eq!(ProgressTier::from_progress(100), ProgressTier::High);
        assert_eq!(ProgressTier::from_progress(80), ProgressTier::High);
        assert_eq!(ProgressTier::from_progress(79), ProgressTier::Medium);
        assert_eq!(ProgressTier::from_progress(40), ProgressTier::Medium);
        assert_eq!(ProgressTier::from_progress(39), ProgressTier::Low);
        assert_eq!(ProgressTier::from_progress(0), ProgressTier::Low);
    }
}
