use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use std::path::Path;

use super::context::AppContext;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let ctx = AppContext::load(config_path)?;
        let session = ctx.session.snapshot().await;

        let Some(claims) = session.claims.as_ref() else {
            println!("You are not logged in.");
            println!();
            println!("Use 'talentup login' to authenticate.");
            return Ok(());
        };

        println!("✓ Authenticated as:");
        println!();
        println!("  Name:     {}", claims.display_name());
        if let Some(username) = &claims.preferred_username {
            println!("  Username: {}", username);
        }
        if let Some(email) = &claims.email {
            println!("  Email:    {}", email);
        }
        println!("  User ID:  {}", claims.sub);
        println!("  Roles:    {}", session.roles().join(", "));

        match (claims.expires_at(), session.seconds_left(Utc::now())) {
            (Some(at), Some(left)) if left > 0 => println!(
                "  Expires:  {} ({}s left)",
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
                left
            ),
            (Some(_), Some(_)) => println!("  Expires:  expired (run 'talentup refresh')"),
            _ => {}
        }

        println!();
        if session.has_any_role(ctx.router.required_roles()) {
            println!("Access to protected pages: granted");
        } else {
            println!(
                "Access to protected pages: denied (requires one of [{}])",
                ctx.router.required_roles().join(", ")
            );
        }

        Ok(())
    }
}
