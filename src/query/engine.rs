//! In-process evaluation of list queries.
//!
//! `query` runs filter, then stable sort, then the page slice over a borrowed
//! collection. The in-memory store reuses the individual steps.

use std::cmp::Ordering;

use super::params::ListQuery;
use super::types::{FilterSpec, Listable, SortDirection, SortSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    /// Records passing the filter, independent of pagination.
    pub total_matching: u64,
}

pub fn matches<T: Listable>(record: &T, filter: &FilterSpec) -> bool {
    record
        .field(filter.field.column)
        .and_then(|v| v.as_text().map(|text| text.contains(filter.value.as_str())))
        .unwrap_or(false)
}

pub fn apply_filter<'a, T, I>(records: I, filter: Option<&FilterSpec>) -> Vec<&'a T>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match filter {
        Some(filter) => records.into_iter().filter(|r| matches(*r, filter)).collect(),
        None => records.into_iter().collect(),
    }
}

/// Stable sort; records with equal keys keep their incoming order.
pub fn apply_sort<T: Listable>(records: &mut [&T], sort: Option<&SortSpec>) {
    let Some(sort) = sort else { return };
    let column = sort.field.column;

    records.sort_by(|a, b| {
        let ordering = match (a.field(column), b.field(column)) {
            (Some(x), Some(y)) => x.compare(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn paginate<T: Clone>(records: &[&T], offset: u64, limit: u64) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    records.iter().skip(skip).take(take).map(|r| (*r).clone()).collect()
}

pub fn query<T: Listable + Clone>(records: &[T], request: &ListQuery) -> QueryResult<T> {
    let mut matching = apply_filter(records, request.filter.as_ref());
    let total_matching = matching.len() as u64;

    apply_sort(&mut matching, request.sort.as_ref());

    QueryResult {
        items: paginate(&matching, request.page.offset(), request.page.size),
        total_matching,
    }
}
