use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::context::AppContext;
use super::render;
use crate::locale;
use crate::routes::Route;
use crate::services::calendar::{next_day, previous_day};
use crate::services::{Calendar, CalendarView, MonthGrid};

const UPCOMING_PANEL: usize = 3;

#[derive(Args, Debug, Default)]
pub struct CalendarCommand {
    /// Day to show (YYYY-MM-DD), today by default
    #[arg(short, long)]
    date: Option<String>,

    /// month or day
    #[arg(long, default_value = "month")]
    view: CalendarView,
}

impl CalendarCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let date = match &self.date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid date: {} (expected YYYY-MM-DD)", raw))?,
            None => Local::now().date_naive(),
        };

        let ctx = AppContext::protected(config_path, Route::Calendar).await?;
        let calendar = Calendar::new(ctx.webinars().await?);

        match self.view {
            CalendarView::Month => print_month(&calendar, date),
            CalendarView::Day => print_day(&calendar, date),
        }

        println!();
        print_side_panels(&calendar);

        Ok(())
    }
}

/// Month grid as text, marked days in cyan and the selected day reversed
pub fn grid_lines(grid: &MonthGrid, selected: NaiveDate) -> Vec<String> {
    let mut lines = vec![locale::weekday_initials().join(" ")];

    for week in &grid.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(day) => {
                    let label = format!("{:>2}", day.date.day());
                    if day.date == selected {
                        label.reversed().to_string()
                    } else if day.has_webinars {
                        label.cyan().bold().to_string()
                    } else {
                        label
                    }
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

fn print_month(calendar: &Calendar, date: NaiveDate) {
    render::heading(&format!("Calendar - {}", locale::format_month_year(date)));

    if let Some(grid) = calendar.month_grid(date.year(), date.month()) {
        for line in grid_lines(&grid, date) {
            println!("  {}", line);
        }
    }

    println!();
    let in_month: Vec<&NaiveDate> = calendar
        .marked_days()
        .filter(|d| d.year() == date.year() && d.month() == date.month())
        .collect();

    if in_month.is_empty() {
        println!("{}", "No webinars this month.".dimmed());
        return;
    }

    for day in in_month {
        println!("{}", locale::format_full_date(*day).bold());
        for webinar in calendar.webinars_on(*day) {
            render::webinar_line(webinar);
        }
    }
}

fn print_day(calendar: &Calendar, date: NaiveDate) {
    render::heading(&locale::format_full_date(date));

    let day = calendar.webinars_on(date);
    if day.is_empty() {
        println!("{}", "No webinars scheduled for this day.".dimmed());
    }
    for webinar in day {
        println!(
            "  {} - {}  {} {}",
            webinar.time_label().bold(),
            webinar.end_time().format("%H:%M"),
            webinar.title,
            render::status_badge(webinar.status)
        );
        println!("    {} · {}", webinar.presenter, webinar.category.cyan());
    }

    println!();
    println!(
        "{}",
        format!(
            "Previous: --date {}   Next: --date {}",
            previous_day(date).format("%Y-%m-%d"),
            next_day(date).format("%Y-%m-%d")
        )
        .dimmed()
    );
}

fn print_side_panels(calendar: &Calendar) {
    if let Some(live) = calendar.live() {
        println!("{} {}", "● Live now:".red().bold(), live.title);
        println!();
    }

    println!("{}", "Upcoming".bold());
    let upcoming = calendar.upcoming(UPCOMING_PANEL);
    if upcoming.is_empty() {
        println!("{}", "  Nothing scheduled.".dimmed());
    }
    for webinar in upcoming {
        println!(
            "  {} {}  {}",
            locale::format_day_month(webinar.date()),
            webinar.time_label(),
            webinar.title
        );
    }
}
