mod calendar;
mod config_cmd;
pub mod context;
mod dashboard;
mod login;
mod logout;
mod open;
mod refresh;
pub mod render;
mod reports;
mod trainees;
mod webinars;
mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use calendar::CalendarCommand;
pub use context::AppContext;
pub use dashboard::DashboardCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use open::OpenCommand;
pub use refresh::RefreshCommand;
pub use reports::ReportsCommand;
pub use trainees::TraineeListArgs;
pub use webinars::{EditArgs, ListArgs, SubmitArgs};
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "talentup")]
#[command(about = "Terminal client for the TalentUp learner webinar platform", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TALENTUP_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login to TalentUp
    Login(LoginCommand),

    /// Logout from TalentUp
    Logout(LogoutCommand),

    /// Show current user information
    Whoami(WhoamiCommand),

    /// Renew the access token
    Refresh(RefreshCommand),

    /// Browse webinars
    #[command(subcommand)]
    Webinars(WebinarSubcommands),

    /// Show the webinar calendar
    Calendar(CalendarCommand),

    /// Browse trainees
    #[command(subcommand)]
    Trainees(TraineeSubcommands),

    /// Show attendance reports
    Reports(ReportsCommand),

    /// Open a page by its path (/, /webinaires, /webinaire/<id>, ...)
    Open(OpenCommand),

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum WebinarSubcommands {
    /// List webinars, optionally filtered
    List(ListArgs),

    /// Show webinar details
    Show {
        /// Webinar ID
        id: String,
    },

    /// Show the most recent webinars
    Recent,

    /// List the categories present in the catalog
    Categories,

    /// Submit a new webinar
    Submit(SubmitArgs),

    /// Edit a webinar locally
    Edit {
        /// Webinar ID
        id: String,

        #[command(flatten)]
        args: EditArgs,
    },

    /// Delete a webinar locally
    Delete {
        /// Webinar ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Discard all local additions, edits and deletions
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TraineeSubcommands {
    /// List trainees
    List(TraineeListArgs),

    /// Show a trainee profile
    Show {
        /// Trainee ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Dashboard(_))
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config = self.config.as_deref();

        match self.command {
            Commands::Login(cmd) => cmd.execute(config).await,
            Commands::Logout(cmd) => cmd.execute(config).await,
            Commands::Whoami(cmd) => cmd.execute(config).await,
            Commands::Refresh(cmd) => cmd.execute(config).await,
            Commands::Webinars(subcmd) => match subcmd {
                WebinarSubcommands::List(args) => webinars::list_webinars(config, args).await,
                WebinarSubcommands::Show { id } => webinars::show_webinar(config, &id).await,
                WebinarSubcommands::Recent => webinars::recent_webinars(config).await,
                WebinarSubcommands::Categories => webinars::list_categories(config).await,
                WebinarSubcommands::Submit(args) => webinars::submit_webinar(config, args).await,
                WebinarSubcommands::Edit { id, args } => {
                    webinars::edit_webinar(config, &id, args).await
                }
                WebinarSubcommands::Delete { id, force } => {
                    webinars::delete_webinar(config, &id, force).await
                }
                WebinarSubcommands::Reset { force } => webinars::reset_local(config, force).await,
            },
            Commands::Calendar(cmd) => cmd.execute(config).await,
            Commands::Trainees(subcmd) => match subcmd {
                TraineeSubcommands::List(args) => trainees::list_trainees(config, args).await,
                TraineeSubcommands::Show { id } => trainees::show_trainee(config, &id).await,
            },
            Commands::Reports(cmd) => cmd.execute(config).await,
            Commands::Open(cmd) => cmd.execute(config).await,
            Commands::Dashboard(cmd) => cmd.execute(config).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config).await,
                ConfigSubcommands::Edit => config_cmd::edit_config(config).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(config, force).await,
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "talentup",
            "webinars",
            "list",
            "--search",
            "React",
            "--category",
            "DevOps",
            "--status",
            "upcoming",
        ])
        .unwrap();

        match &cli.command {
            Commands::Webinars(WebinarSubcommands::List(args)) => {
                assert_eq!(args.search, "React");
                assert_eq!(args.category, "DevOps");
                assert!(args.status.is_some());
            }
            _ => panic!("unexpected command"),
        }
        assert!(!cli.verbose());
    }

    #[test]
    fn test_dashboard_is_interactive() {
        let cli = Cli::try_parse_from(["talentup", "dashboard"]).unwrap();
        assert!(cli.is_interactive());
    }
}
