use chrono::Utc;
use clap::Subcommand;
use serde_json::json;

use super::connect;
use crate::cli::config;
use crate::cli::output::output_success;
use crate::cli::session::Session;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Username (email address)")]
        username: String,
        #[arg(long, env = "WALKS_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Register a new user")]
    Register {
        #[arg(help = "Username (email address)")]
        username: String,
        #[arg(long, env = "WALKS_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
        #[arg(long = "role", help = "Role to grant (Reader or Writer), repeatable")]
        roles: Vec<String>,
    },

    #[command(about = "Forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let client = connect(server)?;
            let token = client.login(&username, &password).await?;
            let session = Session::from_token(client.base_url(), &username, &token)?;
            config::save_session(&session)?;

            output_success(
                &output_format,
                &format!("Logged in as {} ({})", username, session.roles.join(", ")),
                Some(json!({
                    "server": session.server,
                    "roles": session.roles,
                    "expires_at": session.expires_at,
                })),
            )
        }
        AuthCommands::Register { username, password, roles } => {
            let client = connect(server)?;
            let message = client.register(&username, &password, roles).await?;
            output_success(&output_format, &message, None)
        }
        AuthCommands::Logout => {
            config::clear_session()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => match config::load_session()? {
            Some(session) => {
                let expired = session.is_expired(Utc::now());
                let state = if expired { "expired" } else { "active" };
                output_success(
                    &output_format,
                    &format!(
                        "{} on {} ({}), session {} until {}",
                        session.username,
                        session.server,
                        session.roles.join(", "),
                        state,
                        session.expires_at
                    ),
                    Some(json!({
                        "authenticated": !expired,
                        "username": session.username,
                        "server": session.server,
                        "roles": session.roles,
                        "expires_at": session.expires_at,
                    })),
                )
            }
            None => output_success(&output_format, "Not logged in", Some(json!({ "authenticated": false }))),
        },
    }
}
