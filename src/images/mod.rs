//! Image upload rules and on-disk storage.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::ImageConfig;
use crate::error::FieldErrors;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image upload")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A parsed multipart upload, before validation.
#[derive(Debug, Default)]
pub struct ImageUpload {
    /// Name of the file as sent by the client, used for its extension.
    pub original_name: Option<String>,
    pub bytes: Option<Vec<u8>>,
    /// Name to store the file under, without extension.
    pub file_name: Option<String>,
    pub file_description: Option<String>,
}

/// An upload that passed validation.
#[derive(Debug)]
pub struct ValidImage {
    pub file_name: String,
    pub file_description: Option<String>,
    pub file_extension: String,
    pub bytes: Vec<u8>,
}

impl ValidImage {
    pub fn stored_name(&self) -> String {
        format!("{}{}", self.file_name, self.file_extension)
    }

    pub fn size(&self) -> i64 {
        i64::try_from(self.bytes.len()).unwrap_or(i64::MAX)
    }
}

/// Extension including the leading dot, as given. Empty when there is none.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        && !name.contains("..")
}

/// Apply the upload rules, collecting every violation.
pub fn validate(upload: ImageUpload, config: &ImageConfig) -> Result<ValidImage, ImageError> {
    let mut errors = FieldErrors::new();
    let mut reject = |field: &str, message: String| {
        errors.entry(field.to_string()).or_default().push(message);
    };

    let file_name = upload.file_name.map(|n| n.trim().to_string()).unwrap_or_default();
    if file_name.is_empty() {
        reject("fileName", "The FileName field is required.".to_string());
    } else if !is_plain_name(&file_name) {
        reject("fileName", "FileName must not contain path separators.".to_string());
    }

    let file_extension = upload.original_name.as_deref().map(extension_of).unwrap_or_default();
    match &upload.bytes {
        None => reject("file", "The File field is required.".to_string()),
        Some(bytes) => {
            let allowed = config
                .allowed_extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(&file_extension));
            if !allowed {
                reject(
                    "file",
                    format!(
                        "Unsupported file extension. Only {} are allowed.",
                        describe_extensions(&config.allowed_extensions)
                    ),
                );
            }
            if bytes.len() as u64 > config.max_file_size_bytes {
                reject(
                    "file",
                    format!(
                        "File size cannot exceed {}MB.",
                        config.max_file_size_bytes / (1024 * 1024)
                    ),
                );
            }
        }
    }

    if !errors.is_empty() {
        return Err(ImageError::Invalid(errors));
    }

    Ok(ValidImage {
        file_name,
        file_description: upload.file_description.filter(|d| !d.trim().is_empty()),
        file_extension,
        bytes: upload.bytes.unwrap_or_default(),
    })
}

fn describe_extensions(extensions: &[String]) -> String {
    match extensions {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Public URL of a stored image.
pub fn public_path(base_url: &str, stored_name: &str) -> String {
    format!("{}/images/{}", base_url.trim_end_matches('/'), stored_name)
}

/// Directory-backed image storage.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` as `stored_name`, replacing any previous file.
    pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> Result<PathBuf, ImageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(stored_name);
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), size = bytes.len(), "Stored image");
        Ok(path)
    }
}
