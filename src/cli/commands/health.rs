use serde_json::json;

use super::connect;
use crate::cli::output::{output_error, output_success};
use crate::cli::OutputFormat;

/// Report whether the server and its storage are reachable.
pub async fn handle(server: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = connect(server)?;
    let health = client.health().await?;
    let status = health["status"].as_str().unwrap_or("unknown");

    if status == "ok" {
        output_success(
            &output_format,
            &format!("{} is healthy", client.base_url()),
            Some(json!({ "health": health })),
        )
    } else {
        output_error(&output_format, &format!("{} reports status {}", client.base_url(), status))
    }
}
