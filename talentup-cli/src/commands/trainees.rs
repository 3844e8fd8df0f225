use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::context::AppContext;
use super::render;
use crate::models::{Trainee, TraineeFilter, TraineeStatus};
use crate::routes::Route;
use crate::services::seed;

#[derive(Args, Debug, Default)]
pub struct TraineeListArgs {
    /// Text searched in names and emails
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// active, inactive or completed
    #[arg(long)]
    pub status: Option<TraineeStatus>,
}

pub async fn list_trainees(config_path: Option<&Path>, args: TraineeListArgs) -> Result<()> {
    AppContext::protected(config_path, Route::Trainees).await?;

    let trainees = seed::trainees();
    let filter = TraineeFilter {
        search: args.search,
        status: args.status,
    };
    let shown = filter.apply(&trainees);

    render::heading("Trainees");
    if shown.is_empty() {
        println!("{}", "No trainees match your search.".dimmed());
        return Ok(());
    }

    println!(
        "{} {} {} {} {}",
        render::cell("ID", 4).bold(),
        render::cell("Name", 22).bold(),
        render::cell("Email", 30).bold(),
        render::cell("Program", 28).bold(),
        "Progress".bold()
    );
    for trainee in &shown {
        println!(
            "{} {} {} {} {} {:>3}% {}",
            render::cell(&trainee.id, 4).dimmed(),
            render::cell(&trainee.name, 22),
            render::cell(&trainee.email, 30),
            render::cell(&trainee.program, 28),
            render::progress_bar(trainee.progress, 10),
            trainee.progress,
            status_label(trainee.status)
        );
    }

    println!();
    println!("{} of {} trainees", shown.len(), trainees.len());
    Ok(())
}

fn status_label(status: TraineeStatus) -> colored::ColoredString {
    match status {
        TraineeStatus::Active => "Actif".green(),
        TraineeStatus::Inactive => "Inactif".dimmed(),
        TraineeStatus::Completed => "Terminé".blue(),
    }
}

pub async fn show_trainee(config_path: Option<&Path>, id: &str) -> Result<()> {
    AppContext::protected(config_path, Route::Trainees).await?;

    let Some(trainee) = seed::trainees().into_iter().find(|t| t.id == id) else {
        bail!("Trainee not found: {}", id);
    };

    print_profile(&trainee);
    Ok(())
}

fn print_profile(trainee: &Trainee) {
    println!(
        "{} {}",
        format!("[{}]", trainee.initial()).cyan().bold(),
        trainee.name.bold()
    );
    println!("    {}", trainee.headline());
    if !trainee.skills.is_empty() {
        println!("    {}", trainee.skills.join(" · ").cyan());
    }
    println!();

    println!("{}", "Contact".bold());
    println!("  Email:    {}", trainee.email);
    if let Some(phone) = &trainee.phone {
        println!("  Phone:    {}", phone);
    }
    if let Some(location) = &trainee.location {
        println!("  Location: {}", location);
    }
    if let Some(date) = &trainee.enrollment_date {
        println!("  Enrolled: {}", date);
    }

    if let Some(bio) = &trainee.bio {
        println!();
        println!("{}", "About".bold());
        println!("{}", bio);
    }

    println!();
    println!("{}", "Program".bold());
    println!("  {}  {}", trainee.program, status_label(trainee.status));
    println!(
        "  {} {}%  ({}/{} webinars)",
        render::progress_bar(trainee.progress, 20),
        trainee.progress,
        trainee.webinars_attended,
        trainee.total_webinars
    );

    if !trainee.attended_webinars.is_empty() {
        println!();
        println!("{}", "Attended webinars".bold());
        for webinar in &trainee.attended_webinars {
            let rating = webinar
                .rating
                .map(|r| "★".repeat(r as usize))
                .unwrap_or_default();
            println!(
                "  {} {} {} {}",
                render::cell(&webinar.date, 16).dimmed(),
                render::cell(&webinar.title, 52),
                render::cell(&webinar.presenter, 20),
                rating.yellow()
            );
        }
    }

    if !trainee.experience.is_empty() {
        println!();
        println!("{}", "Experience".bold());
        for item in &trainee.experience {
            println!("  {} - {} {}", item.role.bold(), item.company, format!("({})", item.period).dimmed());
            println!("    {}", item.description);
        }
    }

    if !trainee.education.is_empty() {
        println!();
        println!("{}", "Education".bold());
        for item in &trainee.education {
            println!("  {} - {} {}", item.degree, item.institution, format!("({})", item.period).dimmed());
        }
    }

    if !trainee.certifications.is_empty() {
        println!();
        println!("{}", "Certifications".bold());
        for item in &trainee.certifications {
            println!("  {} - {} {}", item.name, item.issuer, format!("({})", item.date).dimmed());
        }
    }
}
