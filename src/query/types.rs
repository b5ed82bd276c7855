use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// A named entity attribute exposed to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Name accepted from callers, matched case-insensitively.
    pub name: &'static str,
    /// Storage column backing the field.
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    /// A text field.
    pub const fn new(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Text }
    }

    pub const fn number(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: FieldKind::Number }
    }
}

/// Borrowed view of a record field, as seen by sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    /// Total order: ordinal for text, IEEE total order for numbers, numbers before text.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Entities that can be served through the list query contract.
pub trait Listable {
    /// Backing table name.
    const TABLE: &'static str;
    /// Fields callers may sort on.
    const SORT_FIELDS: &'static [FieldDef];
    /// Text fields callers may filter on.
    const FILTER_FIELDS: &'static [FieldDef];

    /// Value of the field stored in `column`, if the entity has one.
    fn field(&self, column: &str) -> Option<FieldValue<'_>>;
}

/// Case-insensitive lookup of a caller-supplied field name.
pub fn resolve_field(fields: &'static [FieldDef], name: &str) -> Option<&'static FieldDef> {
    fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static FieldDef,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: &'static FieldDef,
    /// Substring that must occur in the field, compared case-sensitively.
    pub value: String,
}

/// Bounds applied when normalizing page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Page coordinates after clamping. Both fields are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Clamp raw pagination input: number < 1 becomes 1, size < 1 becomes
    /// the default size, size above the maximum becomes the maximum.
    pub fn normalize(number: i64, size: i64, limits: PageLimits) -> Self {
        let number = if number < 1 { DEFAULT_PAGE_NUMBER } else { number as u64 };
        let size = if size < 1 {
            limits.default_size
        } else {
            (size as u64).min(limits.max_size)
        };
        Self { number, size }
    }

    /// Number of records to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata reported next to a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(page: &PageRequest, total_count: u64) -> Self {
        let total_pages = (total_count as f64 / page.size as f64).ceil() as u64;
        Self {
            page_number: page.number,
            page_size: page.size,
            total_count,
            total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Parameter bound into a generated SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Uuid(uuid::Uuid),
    Text(String),
    OptText(Option<String>),
    Float(f64),
    Int(i64),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: &[FieldDef] = &[FieldDef::new("Name", "name"), FieldDef::new("Code", "code")];

    #[test]
    fn resolves_field_names_ignoring_case() {
        assert_eq!(resolve_field(FIELDS, "name").map(|f| f.column), Some("name"));
        assert_eq!(resolve_field(FIELDS, "CODE").map(|f| f.column), Some("code"));
        assert!(resolve_field(FIELDS, "Length").is_none());
        assert!(resolve_field(FIELDS, "").is_none());
        assert!(resolve_field(FIELDS, " Name").is_none());
    }

    #[test]
    fn normalize_clamps_out_of_range_input() {
        let limits = PageLimits::default();
        assert_eq!(PageRequest::normalize(0, 10, limits), PageRequest { number: 1, size: 10 });
        assert_eq!(PageRequest::normalize(-7, 10, limits).number, 1);
        assert_eq!(PageRequest::normalize(2, 0, limits).size, 10);
        assert_eq!(PageRequest::normalize(2, -1, limits).size, 10);
        assert_eq!(PageRequest::normalize(2, 101, limits).size, 100);
        assert_eq!(PageRequest::normalize(2, 100, limits).size, 100);
        assert_eq!(PageRequest::normalize(2, 1, limits).size, 1);
    }

    #[test]
    fn offset_saturates_for_huge_page_numbers() {
        let page = PageRequest::normalize(i64::MAX, 100, PageLimits::default());
        assert_eq!(page.offset(), u64::MAX);
        assert_eq!(PageRequest::normalize(3, 10, PageLimits::default()).offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PageRequest { number: 1, size: 10 };
        assert_eq!(PageMeta::new(&page, 0).total_pages, 0);
        assert_eq!(PageMeta::new(&page, 5).total_pages, 1);
        assert_eq!(PageMeta::new(&page, 10).total_pages, 1);
        assert_eq!(PageMeta::new(&page, 25).total_pages, 3);
    }

    #[test]
    fn numbers_compare_by_value_and_before_text() {
        assert_eq!(FieldValue::Number(2.5).compare(&FieldValue::Number(10.0)), Ordering::Less);
        assert_eq!(FieldValue::Text("b").compare(&FieldValue::Text("a")), Ordering::Greater);
        assert_eq!(FieldValue::Number(99.0).compare(&FieldValue::Text("a")), Ordering::Less);
    }
}
