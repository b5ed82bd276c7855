use super::types::{
    resolve_field, FilterSpec, Listable, PageLimits, PageRequest, SortDirection, SortSpec,
    DEFAULT_PAGE_NUMBER,
};

/// Raw list parameters as they arrive on the query string.
///
/// Every value is kept as text so that malformed input degrades to a default
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub is_ascending: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
}

impl ListParams {
    /// Read list parameters from a raw query string.
    ///
    /// Keys match ignoring ASCII case (`sortBy`, `SortBy`, `sortby`). When a
    /// key repeats, the first occurrence wins. Unrelated keys are ignored.
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw else { return params };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.to_ascii_lowercase().as_str() {
                "sortby" => &mut params.sort_by,
                "isascending" => &mut params.is_ascending,
                "pagenumber" => &mut params.page_number,
                "pagesize" => &mut params.page_size,
                "filteron" => &mut params.filter_on,
                "filterquery" => &mut params.filter_query,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    pub fn to_query<T: Listable>(&self, limits: PageLimits) -> ListQuery {
        let ascending = self
            .is_ascending
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(true);
        let page_number = parse_int(self.page_number.as_deref()).unwrap_or(DEFAULT_PAGE_NUMBER as i64);
        let page_size = parse_int(self.page_size.as_deref()).unwrap_or(limits.default_size as i64);

        ListQuery::resolve::<T>(
            self.sort_by.as_deref(),
            ascending,
            self.filter_on.as_deref(),
            self.filter_query.as_deref(),
            page_number,
            page_size,
            limits,
        )
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// A list request with field names resolved against one entity type and
/// pagination already clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub sort: Option<SortSpec>,
    pub filter: Option<FilterSpec>,
    pub page: PageRequest,
}

impl ListQuery {
    /// Resolve raw list inputs for entity `T`.
    ///
    /// Unknown sort or filter names are dropped without error. A filter only
    /// applies when both the field name and a non-blank value are given.
    pub fn resolve<T: Listable>(
        sort_by: Option<&str>,
        ascending: bool,
        filter_on: Option<&str>,
        filter_query: Option<&str>,
        page_number: i64,
        page_size: i64,
        limits: PageLimits,
    ) -> Self {
        let sort = sort_by
            .filter(|s| !s.trim().is_empty())
            .and_then(|name| {
                let field = resolve_field(T::SORT_FIELDS, name);
                if field.is_none() {
                    tracing::debug!("Ignoring unknown sort field '{}' for {}", name, T::TABLE);
                }
                field
            })
            .map(|field| SortSpec {
                field,
                direction: SortDirection::from_ascending(ascending),
            });

        let filter = match (filter_on, filter_query) {
            (Some(on), Some(value)) if !on.trim().is_empty() && !value.trim().is_empty() => {
                match resolve_field(T::FILTER_FIELDS, on) {
                    Some(field) => Some(FilterSpec {
                        field,
                        value: value.to_string(),
                    }),
                    None => {
                        tracing::debug!("Ignoring unknown filter field '{}' for {}", on, T::TABLE);
                        None
                    }
                }
            }
            _ => None,
        };

        Self {
            sort,
            filter,
            page: PageRequest::normalize(page_number, page_size, limits),
        }
    }
}
