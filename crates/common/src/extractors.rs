//! Custom axum extractors for Garage

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Default first page for list endpoints
const DEFAULT_PAGE_START: i64 = 1;

/// Default page size for list endpoints
const DEFAULT_PAGE_END: i64 = 20;

/// Pagination bounds read from the `page_start` / `page_end` request headers.
///
/// `page_start` is the 1-based page number and `page_end` the page size.
/// Absent or non-numeric headers fall back to the 1/20 defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub page_start: i64,
    pub page_end: i64,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            page_start: DEFAULT_PAGE_START,
            page_end: DEFAULT_PAGE_END,
        }
    }
}

impl PageBounds {
    /// Rows per page, floored at 1
    pub fn limit(&self) -> i64 {
        self.page_end.max(1)
    }

    /// Rows skipped before this page
    pub fn offset(&self) -> i64 {
        (self.page_start.max(1) - 1) * self.limit()
    }
}

fn header_i64(parts: &Parts, name: &str, default: i64) -> i64 {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl<S> FromRequestParts<S> for PageBounds
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            page_start: header_i64(parts, "page_start", DEFAULT_PAGE_START),
            page_end: header_i64(parts, "page_end", DEFAULT_PAGE_END),
        })
    }
}
