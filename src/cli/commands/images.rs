use std::path::PathBuf;

use clap::Subcommand;

use super::{connect, require_writer};
use crate::api::dto::ImageDto;
use crate::cli::output::output_record;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ImageCommands {
    #[command(about = "Upload a .jpg, .jpeg or .png image")]
    Upload {
        #[arg(help = "Path of the image file")]
        file: PathBuf,
        #[arg(long, help = "Stored name, without extension")]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

pub async fn handle(cmd: ImageCommands, server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect(server)?;

    match cmd {
        ImageCommands::Upload { file, name, description } => {
            require_writer(&client)?;
            let image: ImageDto = client.upload_image(&file, &name, description.as_deref()).await?;
            output_record(&output_format, &image)
        }
    }
}
