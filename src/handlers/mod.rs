pub mod auth;
pub mod difficulties;
pub mod images;
pub mod regions;
pub mod system;
pub mod walks;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path id. Anything that is not a UUID cannot name a record.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
