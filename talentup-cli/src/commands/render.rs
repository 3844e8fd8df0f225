// Terminal rendering shared by the commands

use colored::{ColoredString, Colorize};
use console::{pad_str, truncate_str, Alignment};

use crate::api::resolve_media;
use crate::models::{format_playback_time, ProgressTier, Webinar, WebinarStatus};
use crate::services::reports::bar_glyphs;

pub fn heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count().max(32)));
    println!();
}

/// Fixed-width cell, truncated with an ellipsis
pub fn cell(text: &str, width: usize) -> String {
    let truncated = truncate_str(text, width, "…");
    pad_str(&truncated, width, Alignment::Left, None).into_owned()
}

pub fn status_badge(status: WebinarStatus) -> ColoredString {
    let label = status.label();
    match status {
        WebinarStatus::Upcoming => label.blue(),
        WebinarStatus::Live => label.red().bold(),
        WebinarStatus::Completed => label.green(),
        WebinarStatus::Cancelled => label.dimmed(),
    }
}

/// Toast equivalents
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn progress_bar(progress: u8, width: usize) -> ColoredString {
    let bar = bar_glyphs(progress as f64 / 100.0, width);
    match ProgressTier::from_progress(progress) {
        ProgressTier::High => bar.green(),
        ProgressTier::Medium => bar.yellow(),
        ProgressTier::Low => bar.red(),
    }
}

pub fn webinar_table(webinars: &[&Webinar]) {
    if webinars.is_empty() {
        println!("{}", "No webinars match your search.".dimmed());
        return;
    }

    println!(
        "{} {} {} {} {} {}",
        cell("ID", 8).bold(),
        cell("Title", 42).bold(),
        cell("Presenter", 20).bold(),
        cell("Date", 22).bold(),
        cell("Category", 20).bold(),
        "Status".bold()
    );

    for webinar in webinars {
        println!(
            "{} {} {} {} {} {}",
            cell(&webinar.id, 8).dimmed(),
            cell(&webinar.title, 42),
            cell(&webinar.presenter, 20),
            cell(
                &format!("{} {}", webinar.date_label(), webinar.time_label()),
                22
            ),
            cell(&webinar.category, 20).cyan(),
            status_badge(webinar.status)
        );
    }
}

/// Compact card used by the dashboard and calendar listings
pub fn webinar_line(webinar: &Webinar) {
    println!(
        "  {} {}  {}",
        webinar.time_label().bold(),
        webinar.title,
        format!("({}, {})", webinar.presenter, webinar.duration_label()).dimmed()
    );
}

pub fn webinar_detail(webinar: &Webinar, related: &[&Webinar], base_url: &str) {
    println!("{}", webinar.title.bold());
    println!("{}  {}", webinar.category.cyan(), status_badge(webinar.status));
    println!();
    println!("  Presenter: {}", webinar.presenter);
    println!("  Date:      {}", webinar.date_label());
    println!(
        "  Time:      {} - {} ({})",
        webinar.time_label(),
        webinar.end_time().format("%H:%M"),
        webinar.duration_label()
    );
    println!("  Attendees: {}", webinar.attendees);
    if let Some(thumbnail) = &webinar.thumbnail {
        println!("  Thumbnail: {}", resolve_media(base_url, thumbnail));
    }
    if let Some(video) = &webinar.video {
        println!(
            "  Recording: {} (0:00 / {})",
            resolve_media(base_url, video),
            format_playback_time(f64::from(webinar.duration_minutes) * 60.0)
        );
    }
    println!();
    println!("{}", "About this webinar".bold());
    println!("{}", webinar.description_or_default());

    if !related.is_empty() {
        println!();
        println!("{}", "Related webinars".bold());
        for other in related {
            println!(
                "  {} {} {}",
                cell(&other.id, 8).dimmed(),
                other.title,
                format!("- {}", other.date_label()).dimmed()
            );
        }
    }
}

/// Other webinars of the same category, at most three
pub fn related<'a>(webinar: &Webinar, all: &'a [Webinar]) -> Vec<&'a Webinar> {
    all.iter()
        .filter(|w| w.category == webinar.category && w.id != webinar.id)
        .take(3)
        .collect()
}

pub fn not_found(path: &str) {
    println!("{}", "404".bold());
    println!("Oops! Page not found: {}", path);
    println!("Return to the dashboard with `talentup open /`.");
}

pub fn unauthorized() {
    println!("{}", "Access denied".red().bold());
    println!("You do not have the permissions required to view this page.");
    println!("Contact an administrator if you believe this is a mistake.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    #[test]
    fn test_cell_width_with_accents() {
        assert_eq!(console::measure_text_width(&cell("Développement Web", 10)), 10);
        assert_eq!(cell("API", 5), "API  ");
    }

    #[test]
    fn test_related_same_category() {
        let webinars = seed::webinars();
        let ids: Vec<&str> = related(&webinars[0], &webinars)
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, vec!["5"]);
    }
}
