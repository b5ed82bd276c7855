use super::error::QueryError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterSpec, SortSpec, SqlParam, SqlResult};

/// SQL rendering of a list query against one table.
pub struct Filter {
    table_name: String,
    filter: Option<FilterSpec>,
    order: Option<SortSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, QueryError> {
        let table_name = table_name.into();
        validate_identifier(&table_name).map_err(QueryError::InvalidTableName)?;
        Ok(Self {
            table_name,
            filter: None,
            order: None,
            limit: None,
            offset: None,
        })
    }

    pub fn where_filter(&mut self, filter: Option<&FilterSpec>) -> &mut Self {
        self.filter = filter.cloned();
        self
    }

    pub fn order(&mut self, sort: Option<&SortSpec>) -> &mut Self {
        self.order = sort.copied();
        self
    }

    pub fn limit(&mut self, limit: u64, offset: u64) -> &mut Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn to_sql(&self) -> Result<SqlResult, QueryError> {
        let (where_clause, mut params) = FilterWhere::generate(self.filter.as_ref(), 0)?;
        let order_clause = FilterOrder::generate(self.order.as_ref())?;
        let limit_clause = self.build_limit_clause(&mut params);

        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, QueryError> {
        let (where_clause, params) = FilterWhere::generate(self.filter.as_ref(), 0)?;
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_clause)
        };
        Ok(SqlResult { query, params })
    }

    fn build_limit_clause(&self, params: &mut Vec<SqlParam>) -> String {
        let mut clause = Vec::new();
        if let Some(limit) = self.limit {
            params.push(SqlParam::Int(clamp_i64(limit)));
            clause.push(format!("LIMIT ${}", params.len()));
        }
        if let Some(offset) = self.offset {
            params.push(SqlParam::Int(clamp_i64(offset)));
            clause.push(format!("OFFSET ${}", params.len()));
        }
        clause.join(" ")
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn validate_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err("identifier cannot be empty".to_string()),
        Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
            Err(format!("invalid identifier format: {}", name))
        }
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') => {
            Err(format!("invalid identifier format: {}", name))
        }
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::{FieldDef, SortDirection};

    static NAME: FieldDef = FieldDef::new("Name", "name");
    static BAD: FieldDef = FieldDef::new("Name", "name; DROP TABLE walks");

    #[test]
    fn renders_plain_select_with_paging() {
        let mut filter = Filter::new("regions").unwrap();
        filter.limit(10, 20);
        let sql = filter.to_sql().unwrap();
        assert_eq!(sql.query, "SELECT * FROM \"regions\" LIMIT $1 OFFSET $2");
        assert_eq!(sql.params, vec![SqlParam::Int(10), SqlParam::Int(20)]);
    }

    #[test]
    fn renders_filter_order_and_paging_in_sequence() {
        let mut filter = Filter::new("walks").unwrap();
        filter
            .where_filter(Some(&FilterSpec { field: &NAME, value: "Lake".into() }))
            .order(Some(&SortSpec { field: &NAME, direction: SortDirection::Desc }))
            .limit(5, 0);
        let sql = filter.to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT * FROM \"walks\" WHERE strpos(\"name\", $1) > 0 ORDER BY \"name\" COLLATE \"C\" DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            sql.params,
            vec![SqlParam::Text("Lake".into()), SqlParam::Int(5), SqlParam::Int(0)]
        );
    }

    #[test]
    fn count_ignores_order_and_paging() {
        let mut filter = Filter::new("walks").unwrap();
        filter
            .where_filter(Some(&FilterSpec { field: &NAME, value: "50%_off".into() }))
            .order(Some(&SortSpec { field: &NAME, direction: SortDirection::Asc }))
            .limit(10, 90);
        let sql = filter.to_count_sql().unwrap();
        assert_eq!(sql.query, "SELECT COUNT(*) AS count FROM \"walks\" WHERE strpos(\"name\", $1) > 0");
        assert_eq!(sql.params, vec![SqlParam::Text("50%_off".into())]);
    }

    #[test]
    fn huge_offsets_are_clamped_for_postgres() {
        let mut filter = Filter::new("walks").unwrap();
        filter.limit(100, u64::MAX);
        let sql = filter.to_sql().unwrap();
        assert_eq!(sql.params[1], SqlParam::Int(i64::MAX));
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        assert!(Filter::new("").is_err());
        assert!(Filter::new("walks\"; --").is_err());
        assert!(Filter::new("1walks").is_err());

        let mut filter = Filter::new("walks").unwrap();
        filter.order(Some(&SortSpec { field: &BAD, direction: SortDirection::Asc }));
        assert!(matches!(filter.to_sql(), Err(QueryError::InvalidColumn(_))));
    }
}
