use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::context::AppContext;
use super::render;
use crate::models::ReportData;
use crate::routes::Route;
use crate::services::reports::{bar_chart, bar_glyphs, pie_chart};
use crate::services::{seed, ReportTab};

const CHART_WIDTH: usize = 40;

#[derive(Args, Debug, Default)]
pub struct ReportsCommand {
    /// attendance, categories, popular or completion
    #[arg(short, long, default_value = "attendance")]
    tab: ReportTab,
}

impl ReportsCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        AppContext::protected(config_path, Route::Reports).await?;

        let report = seed::report();

        render::heading("Reports");
        print_summary(&report);
        println!();

        match self.tab {
            ReportTab::Attendance => print_attendance(&report),
            ReportTab::Categories => print_categories(&report),
            ReportTab::Popular => print_popular(&report),
            ReportTab::Completion => print_completion(&report),
        }

        Ok(())
    }
}

fn print_summary(report: &ReportData) {
    for card in &report.summary {
        let trend = card.trend_label();
        let trend = if card.trend > 0 {
            trend.green()
        } else if card.trend < 0 {
            trend.red()
        } else {
            trend.dimmed()
        };
        println!(
            "  {} {} {}",
            render::cell(&card.title, 22),
            render::cell(&card.value, 8).bold(),
            trend
        );
    }
}

fn print_attendance(report: &ReportData) {
    println!("{}", "Monthly attendance".bold());
    for bar in bar_chart(&report.monthly_attendance) {
        println!(
            "  {} {} {}",
            render::cell(&bar.name, 5),
            bar_glyphs(bar.height, CHART_WIDTH).cyan(),
            bar.value
        );
    }
}

fn print_categories(report: &ReportData) {
    println!("{}", "Webinars by category".bold());
    for slice in pie_chart(&report.categories) {
        println!(
            "  {} {} {:>5.1}%  {}",
            render::cell(&slice.name, 14),
            bar_glyphs(slice.percent / 100.0, CHART_WIDTH / 2).cyan(),
            slice.percent,
            format!("{:.0}°-{:.0}°", slice.start_angle, slice.end_angle).dimmed()
        );
    }
}

fn print_popular(report: &ReportData) {
    println!("{}", "Most popular webinars".bold());
    println!(
        "  {} {} {} {}",
        render::cell("Title", 32).bold(),
        render::cell("Presenter", 18).bold(),
        render::cell("Date", 12).bold(),
        "Attendees".bold()
    );
    for webinar in &report.top_webinars {
        println!(
            "  {} {} {} {:>9}",
            render::cell(&webinar.title, 32),
            render::cell(&webinar.presenter, 18),
            render::cell(&webinar.date, 12),
            webinar.attendees
        );
    }
}

fn print_completion(report: &ReportData) {
    println!("{}", "Completion rate".bold());
    for webinar in &report.top_webinars {
        println!(
            "  {} {} {}%",
            render::cell(&webinar.title, 32),
            render::progress_bar(webinar.completion_rate, CHART_WIDTH / 2),
            webinar.completion_rate
        );
    }
}
