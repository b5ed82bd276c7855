use super::error::QueryError;
use super::filter::validate_identifier;
use super::types::{FilterSpec, SqlParam};

pub struct FilterWhere;

impl FilterWhere {
    /// Build the WHERE predicate for an optional filter. Placeholders are
    /// numbered from `starting_param_index + 1`.
    ///
    /// `strpos` keeps plain case-sensitive substring semantics, so `%` and `_`
    /// in the filter value need no escaping.
    pub fn generate(
        filter: Option<&FilterSpec>,
        starting_param_index: usize,
    ) -> Result<(String, Vec<SqlParam>), QueryError> {
        match filter {
            None => Ok((String::new(), vec![])),
            Some(filter) => {
                validate_identifier(filter.field.column).map_err(QueryError::InvalidColumn)?;
                let clause = format!(
                    "strpos(\"{}\", ${}) > 0",
                    filter.field.column,
                    starting_param_index + 1
                );
                Ok((clause, vec![SqlParam::Text(filter.value.clone())]))
            }
        }
    }
}
