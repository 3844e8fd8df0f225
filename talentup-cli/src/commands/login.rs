use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};
use std::path::Path;

use super::context::AppContext;
use super::render;

#[derive(Args)]
pub struct LoginCommand {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "TALENTUP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        println!("TalentUp - Login");
        println!();

        let username = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        let ctx = AppContext::load(config_path)?;
        println!(
            "Logging in as {} on {}...",
            username, ctx.config.identity.url
        );

        match ctx.manager.login(&username, &password).await {
            Ok(session) => {
                render::success("Login successful!");
                println!();
                println!("Welcome, {}!", session.username().unwrap_or(&username));

                let roles = session.roles();
                if !roles.is_empty() {
                    println!("Roles: {}", roles.join(", "));
                }
                if !session.has_any_role(ctx.router.required_roles()) {
                    println!();
                    println!(
                        "Note: your account has none of the roles [{}]; protected pages will be refused.",
                        ctx.router.required_roles().join(", ")
                    );
                }

                Ok(())
            }
            Err(e) => {
                render::failure(&format!("Login failed: {}", e));
                Err(e.into())
            }
        }
    }
}
