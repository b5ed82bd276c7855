use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{connect, require_writer, ListArgs};
use crate::api::dto::{WalkDto, WalkRequest};
use crate::cli::output::{output_list, output_record, output_success};
use crate::cli::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct WalkFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, help = "Length in kilometres")]
    pub length: f64,
    #[arg(long)]
    pub region_id: Uuid,
    #[arg(long)]
    pub difficulty_id: Uuid,
    #[arg(long)]
    pub image_url: Option<String>,
}

impl From<WalkFields> for WalkRequest {
    fn from(fields: WalkFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            length_in_km: fields.length,
            walk_image_url: fields.image_url,
            region_id: fields.region_id,
            difficulty_id: fields.difficulty_id,
        }
    }
}

#[derive(Subcommand)]
pub enum WalkCommands {
    #[command(about = "List walks with their region and difficulty")]
    List(ListArgs),

    #[command(about = "Show one walk")]
    Get { id: Uuid },

    #[command(about = "Create a walk")]
    Create(WalkFields),

    #[command(about = "Replace a walk's fields")]
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: WalkFields,
    },

    #[command(about = "Delete a walk")]
    Delete { id: Uuid },
}

pub async fn handle(cmd: WalkCommands, server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect(server)?;

    match cmd {
        WalkCommands::List(args) => {
            let listed = client.list::<WalkDto>("/api/walks", &args.into()).await?;
            output_list(&output_format, "walks", &listed)
        }
        WalkCommands::Get { id } => {
            let walk: WalkDto = client.get(&format!("/api/walks/{}", id)).await?;
            output_record(&output_format, &walk)
        }
        WalkCommands::Create(fields) => {
            require_writer(&client)?;
            let walk: WalkDto = client.post("/api/walks", &WalkRequest::from(fields)).await?;
            output_record(&output_format, &walk)
        }
        WalkCommands::Update { id, fields } => {
            require_writer(&client)?;
            let walk: WalkDto = client.put(&format!("/api/walks/{}", id), &WalkRequest::from(fields)).await?;
            output_record(&output_format, &walk)
        }
        WalkCommands::Delete { id } => {
            require_writer(&client)?;
            client.delete(&format!("/api/walks/{}", id)).await?;
            output_success(&output_format, &format!("Walk {} deleted", id), None)
        }
    }
}
