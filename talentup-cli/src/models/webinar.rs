use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale;

/// Canonical webinar record shared by every view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webinar {
    pub id: String,
    pub title: String,
    pub presenter: String,
    pub scheduled_at: NaiveDateTime,
    pub duration_minutes: u32,
    pub category: String,
    pub status: WebinarStatus,
    pub attendees: u32,
    pub thumbnail: Option<String>,
    pub video: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebinarStatus {
    Upcoming,
    Live,
    Completed,
    Cancelled,
}

impl WebinarStatus {
    pub const ALL: [WebinarStatus; 4] = [
        WebinarStatus::Upcoming,
        WebinarStatus::Live,
        WebinarStatus::Completed,
        WebinarStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebinarStatus::Upcoming => "upcoming",
            WebinarStatus::Live => "live",
            WebinarStatus::Completed => "completed",
            WebinarStatus::Cancelled => "cancelled",
        }
    }

    /// Badge label shown next to a webinar
    pub fn label(&self) -> &'static str {
        match self {
            WebinarStatus::Upcoming => "À venir",
            WebinarStatus::Live => "En direct",
            WebinarStatus::Completed => "Terminé",
            WebinarStatus::Cancelled => "Annulé",
        }
    }
}

impl std::fmt::Display for WebinarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WebinarStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" | "à venir" | "a venir" | "a_venir" | "planifié" | "planifie" => {
                Ok(WebinarStatus::Upcoming)
            }
            "live" | "en direct" | "en_direct" | "en cours" => Ok(WebinarStatus::Live),
            "completed" | "terminé" | "termine" | "passé" | "passe" => {
                Ok(WebinarStatus::Completed)
            }
            "cancelled" | "canceled" | "annulé" | "annule" => Ok(WebinarStatus::Cancelled),
            other => Err(anyhow::anyhow!("Unknown webinar status: {}", other)),
        }
    }
}

impl Webinar {
    /// Create a locally authored webinar with a generated ID
    pub fn new(
        title: String,
        presenter: String,
        scheduled_at: NaiveDateTime,
        duration_minutes: u32,
        category: String,
        description: Option<String>,
    ) -> Self {
        Self {
            id: format!("webinar-{}", Uuid::new_v4()),
            title,
            presenter,
            scheduled_at,
            duration_minutes,
            category,
            status: WebinarStatus::Upcoming,
            attendees: 0,
            thumbnail: None,
            video: None,
            description,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.scheduled_at.time()
    }

    /// "12 juin 2023"
    pub fn date_label(&self) -> String {
        locale::format_long_date(self.date())
    }

    /// "14:00"
    pub fn time_label(&self) -> String {
        self.scheduled_at.format("%H:%M").to_string()
    }

    /// "1h 30m"
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_minutes)
    }

    /// End of the session, used by agenda views ("13:00 - 14:30")
    pub fn end_time(&self) -> NaiveTime {
        (self.scheduled_at + chrono::Duration::minutes(self.duration_minutes as i64)).time()
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description available for this webinar.")
    }

    /// Apply a partial edit made from the list view
    pub fn update(
        &mut self,
        title: Option<String>,
        presenter: Option<String>,
        category: Option<String>,
        description: Option<String>,
    ) {
        if let Some(t) = title {
            self.title = t;
        }
        if let Some(p) = presenter {
            self.presenter = p;
        }
        if let Some(c) = category {
            self.category = c;
        }
        if description.is_some() {
            self.description = description;
        }
    }
}

/// Parse durations written as "1h 30m", "2h", "45m", "1h45" or "90"
pub fn parse_duration(input: &str) -> Option<u32> {
    let compact: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.is_empty() {
        return None;
    }

    if let Ok(minutes) = compact.parse::<u32>() {
        return Some(minutes);
    }

    let (hours, rest) = match compact.split_once('h') {
        Some((h, rest)) => (h.parse::<u32>().ok()?, rest),
        None => (0, compact.as_str()),
    };

    let rest = rest
        .trim_end_matches("min")
        .trim_end_matches("mn")
        .trim_end_matches('m');

    let minutes = if rest.is_empty() {
        0
    } else {
        rest.parse::<u32>().ok()?
    };

    Some(hours * 60 + minutes)
}

/// Inverse of [`parse_duration`]: 90 -> "1h 30m", 120 -> "2h", 45 -> "45m"
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Playback position as m:ss
pub fn format_playback_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
