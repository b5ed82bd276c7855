use super::error::QueryError;
use super::filter::validate_identifier;
use super::types::{FieldKind, SortSpec};

pub struct FilterOrder;

impl FilterOrder {
    /// Text columns sort under the "C" collation so rows come back in byte
    /// order, the same order the in-memory store produces.
    pub fn generate(sort: Option<&SortSpec>) -> Result<String, QueryError> {
        let Some(sort) = sort else { return Ok(String::new()) };
        validate_identifier(sort.field.column).map_err(QueryError::InvalidColumn)?;
        let collate = match sort.field.kind {
            FieldKind::Text => " COLLATE \"C\"",
            FieldKind::Number => "",
        };
        Ok(format!(
            "ORDER BY \"{}\"{} {}",
            sort.field.column,
            collate,
            sort.direction.to_sql()
        ))
    }
}
