use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Webinar, WebinarStatus};

/// Calendar page mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    #[default]
    Month,
    Day,
}

impl std::str::FromStr for CalendarView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" | "mois" => Ok(CalendarView::Month),
            "day" | "jour" => Ok(CalendarView::Day),
            _ => Err(anyhow::anyhow!("Invalid calendar view: {} (month|day)", s)),
        }
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub has_webinars: bool,
}

/// Month laid out as Monday-first weeks; cells outside the month are `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<GridDay>; 7]>,
}

/// Date lookups over a webinar collection
pub struct Calendar {
    webinars: Vec<Webinar>,
    marked: BTreeSet<NaiveDate>,
}

impl Calendar {
    pub fn new(webinars: Vec<Webinar>) -> Self {
        let marked = webinars.iter().map(|w| w.date()).collect();
        Self { webinars, marked }
    }

    pub fn webinars(&self) -> &[Webinar] {
        &self.webinars
    }

    /// Days carrying at least one webinar, ascending
    pub fn marked_days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.marked.iter()
    }

    pub fn has_webinars_on(&self, date: NaiveDate) -> bool {
        self.marked.contains(&date)
    }

    /// Webinars of one day ordered by start time
    pub fn webinars_on(&self, date: NaiveDate) -> Vec<&Webinar> {
        let mut day: Vec<&Webinar> = self.webinars.iter().filter(|w| w.date() == date).collect();
        day.sort_by_key(|w| w.start_time());
        day
    }

    /// First `n` webinars still to come, in catalog order
    pub fn upcoming(&self, n: usize) -> Vec<&Webinar> {
        self.webinars
            .iter()
            .filter(|w| w.status == WebinarStatus::Upcoming)
            .take(n)
            .collect()
    }

    pub fn live(&self) -> Option<&Webinar> {
        self.webinars
            .iter()
            .find(|w| w.status == WebinarStatus::Live)
    }

    pub fn month_grid(&self, year: i32, month: u32) -> Option<MonthGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::new();
        let mut week: [Option<GridDay>; 7] = [None; 7];
        let mut column = offset;
        let mut date = first;

        while date.month() == month {
            week[column] = Some(GridDay {
                date,
                has_webinars: self.has_webinars_on(date),
            });
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        if column > 0 {
            weeks.push(week);
        }

        Some(MonthGrid { year, month, weeks })
    }
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Shift by whole weeks, used by the dashboard's vertical navigation
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date.checked_add_signed(Duration::weeks(weeks))
        .unwrap_or(date)
}

/// Same day number in the adjacent month, clamped to that month's length
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);

    (1..=date.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_webinars_on_and_markers() {
        let calendar = Calendar::new(seed::webinars());

        let day = calendar.webinars_on(date(2023, 6, 15));
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "Maîtriser Tailwind CSS en entreprise");

        assert!(calendar.has_webinars_on(date(2023, 7, 5)));
        assert!(!calendar.has_webinars_on(date(2023, 7, 6)));
        assert_eq!(calendar.marked_days().count(), 8);
    }

    #[test]
    fn test_upcoming_and_live() {
        let calendar = Calendar::new(seed::webinars());

        let upcoming: Vec<&str> = calendar.upcoming(3).iter().map(|w| w.id.as_str()).collect();
        assert_eq!(upcoming, vec!["3", "4", "5"]);
        assert_eq!(calendar.live().map(|w| w.id.as_str()), Some("2"));
    }

    #[test]
    fn test_month_grid_starts_monday() {
        let calendar = Calendar::new(seed::webinars());
        // 1 June 2023 was a Thursday
        let grid = calendar.month_grid(2023, 6).unwrap();

        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][..3].iter().all(|d| d.is_none()));
        assert_eq!(grid.weeks[0][3].unwrap().date, date(2023, 6, 1));

        let marked: Vec<u32> = grid
            .weeks
            .iter()
            .flatten()
            .flatten()
            .filter(|d| d.has_webinars)
            .map(|d| d.date.day())
            .collect();
        assert_eq!(marked, vec![12, 15, 20, 25, 30]);
    }

    #[test]
    fn test_day_navigation() {
        assert_eq!(next_day(date(2023, 6, 30)), date(2023, 7, 1));
        assert_eq!(previous_day(date(2023, 3, 1)), date(2023, 2, 28));
        assert_eq!(shift_weeks(date(2023, 6, 12), 1), date(2023, 6, 19));
        assert_eq!(shift_month(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(shift_month(date(2023, 1, 15), -1), date(2022, 12, 15));
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("month".parse::<CalendarView>().unwrap(), CalendarView::Month);
        assert_eq!("Jour".parse::<CalendarView>().unwrap(), CalendarView::Day);
        assert!("week".parse::<CalendarView>().is_err());
    }
}
