use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::context::AppContext;
use super::render;
use crate::auth::AuthError;

#[derive(Args)]
pub struct RefreshCommand {
    /// Renew even if the token is still valid
    #[arg(short, long)]
    force: bool,
}

impl RefreshCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = AppContext::load(config_path)?;

        let min_validity = if self.force {
            i64::MAX
        } else {
            ctx.config.identity.min_validity_seconds as i64
        };

        match ctx.manager.update_token(min_validity).await {
            Ok(true) => {
                render::success("Access token refreshed");
                Ok(())
            }
            Ok(false) => {
                println!("Token not yet expired, nothing to do.");
                Ok(())
            }
            Err(AuthError::NotAuthenticated) => Err(AuthError::NotAuthenticated.into()),
            Err(e) => {
                render::failure(&format!("Failed to refresh token: {}", e));
                ctx.manager.terminate().await;
                println!("Session terminated. Run 'talentup login' to sign in again.");
                Err(e.into())
            }
        }
    }
}
