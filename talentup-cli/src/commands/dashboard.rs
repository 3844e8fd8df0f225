use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::context::{with_spinner, AppContext};
use super::render;
use crate::auth::TokenRefresher;
use crate::routes::Route;
use crate::ui::{load_snapshot, App, Dashboard, Exit};

#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = AppContext::protected(config_path, Route::Dashboard).await?;

        let snapshot = with_spinner("Loading dashboard...", load_snapshot(&ctx)).await?;
        let username = ctx
            .session
            .snapshot()
            .await
            .username()
            .unwrap_or("learner")
            .to_string();

        // Keeps the token alive while the dashboard is open
        let refresher =
            TokenRefresher::from_config(ctx.manager.clone(), &ctx.config.identity).spawn();

        let exit = tokio::task::block_in_place(|| -> Result<Exit> {
            let mut dashboard = Dashboard::new(&ctx, App::new(snapshot, username))?;
            dashboard.run()
        });
        refresher.abort();

        match exit? {
            Exit::Quit => Ok(()),
            Exit::SessionTerminated { redirect } => {
                render::failure("Your session has expired.");
                println!(
                    "Redirected to {}. Run 'talentup login' to sign in again.",
                    redirect
                );
                Ok(())
            }
        }
    }
}
