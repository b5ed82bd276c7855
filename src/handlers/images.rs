use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderMap},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::dto::ImageDto;
use crate::api::Created;
use crate::database::models::Image;
use crate::error::ApiError;
use crate::images::{self, ImageUpload};
use crate::state::AppState;

/// POST /api/images/upload
///
/// Multipart fields: `File`, `FileName`, `FileDescription` (names matched ignoring case).
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Created<ImageDto>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut upload = ImageUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "file" => {
                upload.original_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
                upload.bytes = Some(bytes.to_vec());
            }
            "filename" => {
                upload.file_name = Some(field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?);
            }
            "filedescription" => {
                upload.file_description =
                    Some(field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?);
            }
            other => debug!(field = other, "Ignoring multipart field"),
        }
    }

    let valid = images::validate(upload, &state.config.images)?;
    let stored_name = valid.stored_name();
    state.image_storage.save(&stored_name, &valid.bytes).await?;

    let base_url = match &state.config.api.public_base_url {
        Some(base) => base.clone(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{}", host)
        }
    };

    let image = Image {
        id: Uuid::nil(),
        file_size_in_bytes: valid.size(),
        file_path: images::public_path(&base_url, &stored_name),
        file_name: valid.file_name,
        file_description: valid.file_description,
        file_extension: valid.file_extension,
    };
    let image = state.images.insert(image).await?;

    info!(id = %image.id, path = %image.file_path, size = image.file_size_in_bytes, "Uploaded image");
    Ok(Created {
        location: image.file_path.clone(),
        body: image.into(),
    })
}
