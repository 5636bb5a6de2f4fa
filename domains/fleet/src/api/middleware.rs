//! Fleet domain state and response-shaping middleware

use axum::{extract::Request, middleware::Next, response::Response};
use garage_common::PasswordHasher;
use std::sync::Arc;

use crate::repository::{CarStore, UserStore};

/// Application state for the fleet domain
///
/// Collaborators are injected explicitly at composition time; handlers never
/// resolve them through ambient lookup.
#[derive(Clone)]
pub struct FleetState {
    pub users: Arc<dyn UserStore>,
    pub cars: Arc<dyn CarStore>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// Pass-through hook for uniform response shaping.
///
/// Extension seam only: forcing a content type on the response here would
/// apply to every fleet endpoint without touching handlers.
pub async fn json_response(request: Request, next: Next) -> Response {
    next.run(request).await
}
