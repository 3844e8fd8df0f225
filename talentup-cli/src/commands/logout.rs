use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::context::AppContext;
use super::render;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = AppContext::load(config_path)?;

        if !ctx.config.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        ctx.manager.logout().await?;
        render::success("Logged out successfully!");

        Ok(())
    }
}
