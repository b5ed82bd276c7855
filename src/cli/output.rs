use serde::Serialize;
use serde_json::{json, Value};

use super::client::Listed;
use super::OutputFormat;
use crate::api::dto::{DifficultyDto, ImageDto, RegionDto, WalkDto};

/// One-line text rendering used for list and detail output.
pub trait TextRow {
    fn text_row(&self) -> String;
}

impl TextRow for RegionDto {
    fn text_row(&self) -> String {
        format!("{}  {:<3}  {}", self.id, self.code, self.name)
    }
}

impl TextRow for DifficultyDto {
    fn text_row(&self) -> String {
        format!("{}  {}", self.id, self.name)
    }
}

impl TextRow for WalkDto {
    fn text_row(&self) -> String {
        let region = self.region.as_ref().map(|r| r.name.as_str()).unwrap_or("-");
        let difficulty = self.difficulty.as_ref().map(|d| d.name.as_str()).unwrap_or("-");
        format!(
            "{}  {}  {:.1} km  {}  {}",
            self.id, self.name, self.length_in_km, region, difficulty
        )
    }
}

impl TextRow for ImageDto {
    fn text_row(&self) -> String {
        format!("{}  {}{}  {} bytes  {}", self.id, self.file_name, self.file_extension, self.file_size_in_bytes, self.file_path)
    }
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

pub fn output_record<T: Serialize + TextRow>(output_format: &OutputFormat, record: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => println!("{}", record.text_row()),
    }
    Ok(())
}

/// Output a page of records with its pagination footer.
pub fn output_list<T: Serialize + TextRow>(
    output_format: &OutputFormat,
    collection_name: &str,
    listed: &Listed<T>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: listed.items,
                    "pagination": listed.meta,
                }))?
            );
        }
        OutputFormat::Text => {
            if listed.items.is_empty() {
                println!("No {} found", collection_name);
            }
            for item in &listed.items {
                println!("{}", item.text_row());
            }
            if let Some(meta) = &listed.meta {
                println!(
                    "-- page {} of {} ({} total, {} per page)",
                    meta.page_number, meta.total_pages, meta.total_count, meta.page_size
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn walk_row_shows_expanded_names() {
        let walk = WalkDto {
            id: Uuid::nil(),
            name: "Tongariro Crossing".into(),
            description: "Alpine".into(),
            length_in_km: 19.4,
            walk_image_url: None,
            region_id: Uuid::nil(),
            difficulty_id: Uuid::nil(),
            region: None,
            difficulty: Some(DifficultyDto { id: Uuid::nil(), name: "Hard".into() }),
        };
        let row = walk.text_row();
        assert!(row.contains("Tongariro Crossing"));
        assert!(row.contains("19.4 km"));
        assert!(row.ends_with("-  Hard"));
    }

    #[test]
    fn region_row_pads_code() {
        let region = RegionDto {
            id: Uuid::nil(),
            code: "AK".into(),
            name: "Auckland".into(),
            region_image_url: None,
        };
        assert!(region.text_row().contains("AK   Auckland"));
    }
}
