// Chart geometry for the reports page

use crate::models::ChartPoint;

/// Headroom above the tallest bar
const BAR_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    pub value: u64,
    /// Fraction of the chart height, in 0..1
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub name: String,
    pub value: u64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percent: f64,
}

/// Report tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTab {
    #[default]
    Attendance,
    Categories,
    Popular,
    Completion,
}

impl std::str::FromStr for ReportTab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attendance" => Ok(ReportTab::Attendance),
            "categories" => Ok(ReportTab::Categories),
            "popular" => Ok(ReportTab::Popular),
            "completion" => Ok(ReportTab::Completion),
            _ => Err(anyhow::anyhow!(
                "Invalid report tab: {} (attendance|categories|popular|completion)",
                s
            )),
        }
    }
}

/// Bars scaled against the largest value plus 10% headroom
pub fn bar_chart(points: &[ChartPoint]) -> Vec<Bar> {
    let max = points.iter().map(|p| p.value).max().unwrap_or(0);
    let scale = max as f64 * BAR_HEADROOM;

    points
        .iter()
        .map(|p| Bar {
            name: p.name.clone(),
            value: p.value,
            height: if scale > 0.0 { p.value as f64 / scale } else { 0.0 },
        })
        .collect()
}

/// Pie slices in degrees, clockwise from 0
pub fn pie_chart(points: &[ChartPoint]) -> Vec<Slice> {
    let total: u64 = points.iter().map(|p| p.value).sum();
    let mut angle = 0.0;

    points
        .iter()
        .map(|p| {
            let share = if total > 0 {
                p.value as f64 / total as f64
            } else {
                0.0
            };
            let start_angle = angle;
            angle += share * 360.0;
            Slice {
                name: p.name.clone(),
                value: p.value,
                start_angle,
                end_angle: angle,
                percent: share * 100.0,
            }
        })
        .collect()
}

/// Text bar of `width` cells for a 0..1 fraction
pub fn bar_glyphs(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    #[test]
    fn test_bar_heights() {
        let report = seed::report();
        let bars = bar_chart(&report.monthly_attendance);

        assert_eq!(bars.len(), 12);
        let october = bars.iter().find(|b| b.name == "Oct").unwrap();
        assert!((october.height - 1.0 / 1.1).abs() < 1e-9);
        assert!(bars.iter().all(|b| b.height < 1.0));
    }

    #[test]
    fn test_pie_slices() {
        let report = seed::report();
        let slices = pie_chart(&report.categories);

        // 15 / 39 of the circle
        assert!((slices[0].end_angle - 15.0 / 39.0 * 360.0).abs() < 1e-9);
        assert_eq!(slices[1].start_angle, slices[0].end_angle);
        assert!((slices.last().unwrap().end_angle - 360.0).abs() < 1e-9);

        let total: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_charts() {
        assert!(bar_chart(&[]).is_empty());
        let zero = vec![ChartPoint {
            name: "Vide".to_string(),
            value: 0,
        }];
        assert_eq!(bar_chart(&zero)[0].height, 0.0);
        assert_eq!(pie_chart(&zero)[0].percent, 0.0);
    }

    #[test]
    fn test_bar_glyphs() {
        assert_eq!(bar_glyphs(0.5, 4), "██░░");
        assert_eq!(bar_glyphs(2.0, 2), "██");
    }
}
