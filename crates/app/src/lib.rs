//! Garage application composition root
//!
//! Composes the fleet domain router with shared infrastructure routes,
//! injecting the storage and hash collaborators explicitly.

use axum::Router;
use garage_common::SaltedSha256;
use garage_fleet::{FleetState, PgCarStore, PgUserStore};
use sqlx::PgPool;
use std::sync::Arc;

/// Create the main application router with all routes and middleware
pub fn create_app(pool: PgPool) -> Router {
    let fleet_state = FleetState {
        users: Arc::new(PgUserStore::new(pool.clone())),
        cars: Arc::new(PgCarStore::new(pool)),
        hasher: Arc::new(SaltedSha256),
    };

    app_with_state(fleet_state)
}

/// Build the router around an already-assembled state.
///
/// Lets tests and database-less setups supply their own collaborators.
pub fn app_with_state(fleet_state: FleetState) -> Router {
    Router::new()
        .route("/", axum::routing::get(liveness))
        .route("/health", axum::routing::get(health_check))
        .merge(garage_fleet::routes().with_state(fleet_state))
}

/// Liveness probe
async fn liveness() -> &'static str {
    "ok"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
