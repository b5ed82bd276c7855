pub mod client;
pub mod commands;
pub mod config;
pub mod output;
pub mod session;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ClientError;

#[derive(Parser)]
#[command(name = "walks")]
#[command(about = "Walks CLI - browse and manage regions, walks and images")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "WALKS_API_URL", help = "API base URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Region operations")]
    Regions {
        #[command(subcommand)]
        cmd: commands::regions::RegionCommands,
    },

    #[command(about = "Walk operations")]
    Walks {
        #[command(subcommand)]
        cmd: commands::walks::WalkCommands,
    },

    #[command(about = "Difficulty levels")]
    Difficulties {
        #[command(subcommand)]
        cmd: commands::difficulties::DifficultyCommands,
    },

    #[command(about = "Image uploads")]
    Images {
        #[command(subcommand)]
        cmd: commands::images::ImageCommands,
    },

    #[command(about = "Check that the server is up")]
    Health,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server.as_deref();

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, server, output_format.clone()).await,
        Commands::Regions { cmd } => commands::regions::handle(cmd, server, output_format.clone()).await,
        Commands::Walks { cmd } => commands::walks::handle(cmd, server, output_format.clone()).await,
        Commands::Difficulties { cmd } => commands::difficulties::handle(cmd, server, output_format.clone()).await,
        Commands::Images { cmd } => commands::images::handle(cmd, server, output_format.clone()).await,
        Commands::Health => commands::health::handle(server, output_format.clone()).await,
    };

    if let Err(e) = &result {
        // 401 means the stored token is no longer accepted.
        if matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Unauthorized(_))) {
            config::clear_session()?;
        }
        if matches!(output_format, OutputFormat::Json) {
            output::output_error(&output_format, &e.to_string())?;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_flags() {
        let cli = Cli::try_parse_from([
            "walks", "--json", "walks", "list", "--sort-by", "LengthInKm", "--desc", "--page", "2", "--page-size", "5",
        ])
        .unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Walks { cmd: commands::walks::WalkCommands::List(args) } => {
                assert_eq!(args.sort_by.as_deref(), Some("LengthInKm"));
                assert!(args.desc);
                assert_eq!(args.page, Some(2));
                assert_eq!(args.page_size, Some(5));
            }
            _ => panic!("expected walks list"),
        }
    }

    #[test]
    fn filter_flags_must_come_together() {
        assert!(Cli::try_parse_from(["walks", "regions", "list", "--filter-on", "Name"]).is_err());
        assert!(Cli::try_parse_from(["walks", "regions", "list", "--filter-on", "Name", "--filter-query", "Auck"]).is_ok());
    }
}
