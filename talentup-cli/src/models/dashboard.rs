use serde::{Deserialize, Serialize};

/// Headline figure on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: Option<StatChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatChange {
    pub value: String,
    pub positive: bool,
}

impl StatChange {
    /// "+12%" / "-2%"
    pub fn label(&self) -> String {
        format!("{}{}", if self.positive { "+" } else { "-" }, self.value)
    }
}

/// Compact entry of the "upcoming webinars" panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingWebinar {
    pub title: String,
    pub date: String,
    pub time: String,
    pub presenter: String,
}

/// Summary card of the reports page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub title: String,
    pub value: String,
    pub trend: i32,
}

impl ReportSummary {
    /// "+12%", "0%", "-1%"
    pub fn trend_label(&self) -> String {
        if self.trend > 0 {
            format!("+{}%", self.trend)
        } else {
            format!("{}%", self.trend)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopWebinar {
    pub title: String,
    pub presenter: String,
    pub date: String,
    pub attendees: u32,
    pub completion_rate: u8,
}

/// Everything the reports page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub summary: Vec<ReportSummary>,
    pub monthly_attendance: Vec<ChartPoint>,
    pub categories: Vec<ChartPoint>,
    pub top_webinars: Vec<TopWebinar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_labels() {
        let mut summary = ReportSummary {
            title: "Taux d'assiduité".to_string(),
            value: "87%".to_string(),
            trend: 5,
        };
        assert_eq!(summary.trend_label(), "+5%");

        summary.trend = 0;
        assert_eq!(summary.trend_label(), "0%");

        summary.trend = -1;
        assert_eq!(summary.trend_label(), "-1%");
    }

    #[test]
    fn test_stat_change_label() {
        let change = StatChange {
            value: "2%".to_string(),
            positive: false,
        };
        assert_eq!(change.label(), "-2%");
    }
}
