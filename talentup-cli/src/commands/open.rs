use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::calendar::{grid_lines, CalendarCommand};
use super::context::{with_spinner, AppContext};
use super::reports::ReportsCommand;
use super::trainees::{list_trainees, TraineeListArgs};
use super::render;
use super::webinars::{list_webinars, show_webinar, ListArgs};
use crate::auth::AuthError;
use crate::locale;
use crate::routes::{Outcome, Route};
use crate::services::Calendar;

/// Resolve a path the way the web router does and render the page
#[derive(Args, Debug)]
pub struct OpenCommand {
    /// Route path, e.g. /webinaires or /webinaire/3
    #[arg(default_value = "/")]
    path: String,
}

impl OpenCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = AppContext::load(config_path)?;
        ctx.ensure_fresh_token().await?;

        let session = ctx.session.snapshot().await;
        let outcome = ctx.router.resolve(&self.path, &session);
        tracing::debug!(path = %self.path, ?outcome, "Route resolved");

        match outcome {
            Outcome::LoginRequired => Err(AuthError::NotAuthenticated.into()),
            Outcome::Redirect(target) => {
                println!("{}", format!("Redirected to {}", target.path()).dimmed());
                println!();
                render::unauthorized();
                Ok(())
            }
            Outcome::Render(route) => render_route(ctx, route, config_path).await,
        }
    }
}

async fn render_route(ctx: AppContext, route: Route, config_path: Option<&Path>) -> Result<()> {
    match route {
        Route::Dashboard => print_home(&ctx).await,
        Route::Webinars => list_webinars(config_path, ListArgs::default()).await,
        Route::WebinarDetail(id) => show_webinar(config_path, &id).await,
        Route::Calendar => CalendarCommand::default().execute(config_path).await,
        Route::Trainees => list_trainees(config_path, TraineeListArgs::default()).await,
        Route::Reports => ReportsCommand::default().execute(config_path).await,
        Route::Unauthorized => {
            render::unauthorized();
            Ok(())
        }
        Route::NotFound(path) => {
            render::not_found(&path);
            Ok(())
        }
    }
}

/// Home page: stats, recent webinars, upcoming sessions, this month
pub async fn print_home(ctx: &AppContext) -> Result<()> {
    let (stats, recent, upcoming) = with_spinner("Loading dashboard...", async {
        tokio::try_join!(
            ctx.query.stats(),
            ctx.query.recent_webinars(),
            ctx.query.upcoming_webinars()
        )
    })
    .await
    .context("Failed to load dashboard")?;

    let session = ctx.session.snapshot().await;
    render::heading(&format!(
        "Welcome back, {}",
        session.username().unwrap_or("learner")
    ));

    for card in &stats {
        let change = match &card.change {
            Some(change) if change.positive => change.label().green(),
            Some(change) => change.label().red(),
            None => "".normal(),
        };
        println!(
            "  {} {} {}",
            render::cell(&card.title, 22),
            render::cell(&card.value, 6).bold(),
            change
        );
    }

    println!();
    println!("{}", "Recent webinars".bold());
    for webinar in &recent {
        println!(
            "  {} {} {}",
            render::cell(&webinar.title, 48),
            render::cell(&webinar.date_label(), 16).dimmed(),
            render::status_badge(webinar.status)
        );
    }

    println!();
    println!("{}", "Upcoming".bold());
    for item in &upcoming {
        println!(
            "  {} {} {} {}",
            render::cell(&item.date, 10),
            render::cell(&item.time, 6).bold(),
            render::cell(&item.title, 48),
            item.presenter.dimmed()
        );
    }

    let calendar = Calendar::new(ctx.webinars().await?);
    let today = Local::now().date_naive();
    if let Some(grid) = calendar.month_grid(today.year(), today.month()) {
        println!();
        println!("{}", locale::format_month_year(today).bold());
        for line in grid_lines(&grid, today) {
            println!("  {}", line);
        }
    }

    Ok(())
}
