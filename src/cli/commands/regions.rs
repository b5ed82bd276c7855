use clap::Subcommand;
use uuid::Uuid;

use super::{connect, require_writer, ListArgs};
use crate::api::dto::{RegionDto, RegionRequest};
use crate::cli::output::{output_list, output_record, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum RegionCommands {
    #[command(about = "List regions")]
    List(ListArgs),

    #[command(about = "Show one region")]
    Get { id: Uuid },

    #[command(about = "Create a region")]
    Create {
        #[arg(long, help = "Three letter code")]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        image_url: Option<String>,
    },

    #[command(about = "Replace a region's fields")]
    Update {
        id: Uuid,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        image_url: Option<String>,
    },

    #[command(about = "Delete a region and its walks")]
    Delete { id: Uuid },
}

pub async fn handle(cmd: RegionCommands, server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect(server)?;

    match cmd {
        RegionCommands::List(args) => {
            let listed = client.list::<RegionDto>("/api/regions", &args.into()).await?;
            output_list(&output_format, "regions", &listed)
        }
        RegionCommands::Get { id } => {
            let region: RegionDto = client.get(&format!("/api/regions/{}", id)).await?;
            output_record(&output_format, &region)
        }
        RegionCommands::Create { code, name, image_url } => {
            require_writer(&client)?;
            let body = RegionRequest { code, name, region_image_url: image_url };
            let region: RegionDto = client.post("/api/regions", &body).await?;
            output_record(&output_format, &region)
        }
        RegionCommands::Update { id, code, name, image_url } => {
            require_writer(&client)?;
            let body = RegionRequest { code, name, region_image_url: image_url };
            let region: RegionDto = client.put(&format!("/api/regions/{}", id), &body).await?;
            output_record(&output_format, &region)
        }
        RegionCommands::Delete { id } => {
            require_writer(&client)?;
            client.delete(&format!("/api/regions/{}", id)).await?;
            output_success(&output_format, &format!("Region {} deleted", id), None)
        }
    }
}
