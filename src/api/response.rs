use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::query::{Page, PageMeta};

pub const TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");
pub const PAGE_NUMBER: HeaderName = HeaderName::from_static("x-page-number");
pub const PAGE_SIZE: HeaderName = HeaderName::from_static("x-page-size");
pub const TOTAL_PAGES: HeaderName = HeaderName::from_static("x-total-pages");

/// Names of the pagination headers, for CORS exposure.
pub const PAGINATION_HEADERS: [HeaderName; 4] = [TOTAL_COUNT, PAGE_NUMBER, PAGE_SIZE, TOTAL_PAGES];

/// A page of records rendered as a bare JSON array with pagination headers.
#[derive(Debug)]
pub struct PagedResponse<T: Serialize> {
    pub page: Page<T>,
}

impl<T: Serialize> PagedResponse<T> {
    pub fn new(page: Page<T>) -> Self {
        Self { page }
    }
}

pub fn pagination_headers(meta: &PageMeta) -> [(HeaderName, HeaderValue); 4] {
    [
        (TOTAL_COUNT, HeaderValue::from(meta.total_count)),
        (PAGE_NUMBER, HeaderValue::from(meta.page_number)),
        (PAGE_SIZE, HeaderValue::from(meta.page_size)),
        (TOTAL_PAGES, HeaderValue::from(meta.total_pages)),
    ]
}

impl<T: Serialize> IntoResponse for PagedResponse<T> {
    fn into_response(self) -> Response {
        let headers = pagination_headers(&self.page.meta);
        (StatusCode::OK, headers, Json(self.page.items)).into_response()
    }
}

/// 201 with a `Location` header pointing at the new resource.
#[derive(Debug)]
pub struct Created<T: Serialize> {
    pub location: String,
    pub body: T,
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        match HeaderValue::try_from(self.location) {
            Ok(location) => (StatusCode::CREATED, [(header::LOCATION, location)], Json(self.body)).into_response(),
            Err(_) => (StatusCode::CREATED, Json(self.body)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRequest;

    #[test]
    fn paged_response_sets_headers_and_plain_array() {
        let page = Page {
            items: vec![1, 2, 3],
            meta: PageMeta::new(&PageRequest { number: 2, size: 3 }, 8),
        };
        let response = PagedResponse::new(page).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["x-total-count"], "8");
        assert_eq!(headers["x-page-number"], "2");
        assert_eq!(headers["x-page-size"], "3");
        assert_eq!(headers["x-total-pages"], "3");
    }

    #[test]
    fn created_sets_location() {
        let response = Created {
            location: "/api/regions/abc".to_string(),
            body: "x",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/regions/abc");
    }
}
