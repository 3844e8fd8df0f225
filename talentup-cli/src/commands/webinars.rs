use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

use super::context::{with_spinner, AppContext};
use super::render;
use crate::api::{QueryKey, Submission};
use crate::models::{categories, CategorySelector, WebinarFilter, WebinarStatus};
use crate::routes::Route;
use crate::services::form::{resolve_category, WebinarDraft, CATEGORIES};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text searched in titles
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category to keep ("all" for every category)
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Status to keep (upcoming, live, completed, cancelled)
    #[arg(long)]
    pub status: Option<WebinarStatus>,

    /// Also search presenter names
    #[arg(short, long)]
    pub presenter: bool,
}

impl ListArgs {
    pub fn filter(&self) -> WebinarFilter {
        WebinarFilter {
            search: self.search.clone(),
            category: CategorySelector::parse(&self.category),
            status: self.status,
            match_presenter: self.presenter,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Webinar title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Webinar description
    #[arg(short, long)]
    pub description: Option<String>,

    /// One of the fixed categories
    #[arg(short, long)]
    pub category: Option<String>,

    /// Cover image (image/*, 5MB max)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Recording (video/*, 50MB max)
    #[arg(long)]
    pub video: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub presenter: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.presenter.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

pub async fn list_webinars(config_path: Option<&Path>, args: ListArgs) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;
    let webinars = ctx.webinars().await?;

    let filter = args.filter();
    let shown = filter.apply(&webinars);

    render::heading("Webinars");
    render::webinar_table(&shown);

    println!();
    if filter.is_active() {
        println!(
            "{} of {} webinars ({})",
            shown.len(),
            webinars.len(),
            filter.category.label()
        );
    } else {
        println!("{} webinars", webinars.len());
    }

    Ok(())
}

pub async fn show_webinar(config_path: Option<&Path>, id: &str) -> Result<()> {
    let route = Route::WebinarDetail(id.to_string());
    let ctx = AppContext::protected(config_path, route.clone()).await?;

    let Some(webinar) = ctx.webinar(id).await? else {
        tracing::warn!("404 Error: User attempted to access non-existent route: {}", route.path());
        render::not_found(&route.path());
        bail!("Webinar not found: {}", id);
    };

    // Related entries are a bonus; a failed list fetch only hides them
    let all = match ctx.webinars().await {
        Ok(all) => all,
        Err(e) => {
            tracing::warn!("Could not load related webinars: {:#}", e);
            Vec::new()
        }
    };
    let related = render::related(&webinar, &all);

    render::webinar_detail(&webinar, &related, &ctx.config.api.base_url);
    Ok(())
}

pub async fn recent_webinars(config_path: Option<&Path>) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;
    let recent = with_spinner("Loading recent webinars...", ctx.query.recent_webinars())
        .await
        .context("Failed to load recent webinars")?;

    render::heading("Recent webinars");
    for webinar in &recent {
        println!(
            "{} {}",
            render::cell(&webinar.id, 8).dimmed(),
            webinar.title.bold()
        );
        println!(
            "         {} · {} · {}",
            webinar.presenter,
            webinar.date_label(),
            render::status_badge(webinar.status)
        );
    }
    if recent.is_empty() {
        println!("{}", "No recent webinars.".dimmed());
    }

    Ok(())
}

pub async fn list_categories(config_path: Option<&Path>) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;
    let webinars = ctx.webinars().await?;

    println!("all");
    for category in categories(&webinars) {
        let count = webinars.iter().filter(|w| w.category == category).count();
        println!("{} {}", category, format!("({})", count).dimmed());
    }

    Ok(())
}

/// Fill the draft from flags, prompting for whatever is missing
fn build_draft(args: SubmitArgs) -> Result<WebinarDraft> {
    let title = match args.title {
        Some(title) => title,
        None => Input::new().with_prompt("Title").interact_text()?,
    };
    let description = match args.description {
        Some(description) => description,
        None => Input::new().with_prompt("Description").interact_text()?,
    };
    let category = match args.category {
        Some(category) => category,
        None => {
            let idx = Select::new()
                .with_prompt("Category")
                .items(&CATEGORIES)
                .default(0)
                .interact()?;
            CATEGORIES[idx].to_string()
        }
    };

    let mut draft = WebinarDraft {
        title,
        description,
        category,
        ..Default::default()
    };
    if let Some(image) = &args.image {
        draft.set_image(image)?;
    }
    if let Some(video) = &args.video {
        draft.set_video(video)?;
    }

    Ok(draft)
}

pub async fn submit_webinar(config_path: Option<&Path>, args: SubmitArgs) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;

    let draft = match build_draft(args) {
        Ok(draft) => draft,
        Err(e) => {
            render::failure(&format!("{:#}", e));
            return Err(e);
        }
    };
    if let Err(e) = draft.validate() {
        render::failure(&e.to_string());
        return Err(e.into());
    }

    let submitted = with_spinner("Submitting webinar...", ctx.query.source().submit(&draft)).await;

    match submitted {
        Ok(Submission::Remote(body)) => {
            ctx.query.invalidate(&QueryKey::Webinars).await;
            tracing::debug!("Backend accepted webinar: {}", body);
            render::success("Webinar submitted successfully!");
            Ok(())
        }
        Ok(Submission::Local(webinar)) => {
            ctx.store()?.save_webinar(&webinar)?;
            render::success(&format!("Webinar added: {} ({})", webinar.title, webinar.id));
            Ok(())
        }
        Err(e) => {
            render::failure(&format!("Failed to submit webinar: {}", e));
            Err(e.into())
        }
    }
}

pub async fn edit_webinar(config_path: Option<&Path>, id: &str, args: EditArgs) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;

    let Some(mut webinar) = ctx.webinar(id).await? else {
        bail!("Webinar not found: {}", id);
    };

    if args.is_empty() {
        println!("Edit Webinar: {}", webinar.id);
        println!();

        let title: String = Input::new()
            .with_prompt("Title")
            .with_initial_text(webinar.title.clone())
            .interact_text()?;
        let presenter: String = Input::new()
            .with_prompt("Presenter")
            .with_initial_text(webinar.presenter.clone())
            .interact_text()?;
        let category: String = Input::new()
            .with_prompt("Category")
            .with_initial_text(webinar.category.clone())
            .interact_text()?;
        let description: String = Input::new()
            .with_prompt("Description")
            .with_initial_text(webinar.description.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        webinar.update(
            Some(title),
            Some(presenter),
            Some(canonical_category(category)),
            Some(description).filter(|d| !d.trim().is_empty()),
        );
    } else {
        webinar.update(
            args.title,
            args.presenter,
            args.category.map(canonical_category),
            args.description,
        );
    }

    ctx.store()?.save_webinar(&webinar)?;
    render::success(&format!("Webinar updated: {}", webinar.title));

    Ok(())
}

/// Known categories keep their canonical spelling, anything else is kept as typed
fn canonical_category(input: String) -> String {
    match resolve_category(&input) {
        Ok(known) => known.to_string(),
        Err(_) => input.trim().to_string(),
    }
}

pub async fn delete_webinar(config_path: Option<&Path>, id: &str, force: bool) -> Result<()> {
    let ctx = AppContext::protected(config_path, Route::Webinars).await?;

    let Some(webinar) = ctx.webinar(id).await? else {
        bail!("Webinar not found: {}", id);
    };

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", webinar.title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.store()?.hide_webinar(id)?;
    render::success(&format!("Webinar deleted: {}", webinar.title));

    Ok(())
}

pub async fn reset_local(config_path: Option<&Path>, force: bool) -> Result<()> {
    let ctx = AppContext::load(config_path)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Discard every local addition, edit and deletion?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.store()?.reset()?;
    render::success("Local changes cleared");

    Ok(())
}
