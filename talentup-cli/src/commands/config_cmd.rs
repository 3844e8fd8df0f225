use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

use super::render;
use crate::config::Config;

pub async fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    if let Some(path) = &config.path {
        println!("{}", format!("# {}", path.display()).dimmed());
    }
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(config_path: Option<&Path>) -> Result<()> {
    let config_file = Config::config_file(config_path)?;

    // Ensure config file exists
    if !config_file.exists() {
        let config = Config {
            path: Some(config_file.clone()),
            ..Config::default()
        };
        config.save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    let status = Command::new(&editor)
        .arg(&config_file)
        .status()
        .with_context(|| format!("Failed to launch editor {}", editor))?;

    // Reject a file that no longer parses
    Config::load(Some(&config_file)).context("Configuration file is invalid after editing")?;

    if status.success() {
        render::success("Configuration saved!");
    }

    Ok(())
}

pub async fn init_config(config_path: Option<&Path>, force: bool) -> Result<()> {
    let config_file = Config::config_file(config_path)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        path: Some(config_file.clone()),
        ..Config::default()
    };
    config.save()?;

    render::success(&format!("Configuration initialized at: {}", config_file.display()));
    println!();
    println!("You can edit it with: talentup config edit");

    Ok(())
}
