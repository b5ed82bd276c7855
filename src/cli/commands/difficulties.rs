use clap::Subcommand;

use super::{connect, ListArgs};
use crate::api::dto::DifficultyDto;
use crate::cli::output::output_list;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum DifficultyCommands {
    #[command(about = "List difficulty levels")]
    List(ListArgs),
}

pub async fn handle(cmd: DifficultyCommands, server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect(server)?;

    match cmd {
        DifficultyCommands::List(args) => {
            let listed = client.list::<DifficultyDto>("/api/difficulties", &args.into()).await?;
            output_list(&output_format, "difficulties", &listed)
        }
    }
}
