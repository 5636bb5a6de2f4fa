//! HTTP handlers for the fleet domain
//!
//! Every operation follows the same two-branch shape: attempt the data
//! operation, serialize the result on success, and answer with the failure
//! envelope otherwise.

pub mod auth;
pub mod cars;
pub mod users;

use axum::http::HeaderMap;
use garage_common::Failure;

/// Parse a path identity, reporting a non-numeric value as a field problem.
pub(crate) fn parse_id(raw: &str) -> Result<i64, Failure> {
    raw.parse().map_err(|_| {
        Failure::validation(format!("invalid id `{raw}`")).with_fields(vec!["id".to_string()])
    })
}

/// Optional id filter carried by the `authorization` header.
pub(crate) fn authorization_filter(headers: &HeaderMap) -> Result<Option<i64>, Failure> {
    let Some(value) = headers.get("authorization") else {
        return Ok(None);
    };

    let invalid = |shown: &str| {
        Failure::validation(format!("invalid authorization filter `{shown}`"))
            .with_fields(vec!["authorization".to_string()])
    };

    let value = value.to_str().map_err(|_| invalid("<binary>"))?;
    value.trim().parse().map(Some).map_err(|_| invalid(value))
}
