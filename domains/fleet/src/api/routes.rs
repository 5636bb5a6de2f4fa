//! Route definitions for the fleet domain API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{auth, cars, users};
use super::middleware::{json_response, FleetState};

/// Create user resource routes
fn user_routes() -> Router<FleetState> {
    Router::new()
        .route("/users", get(users::index).post(users::store))
        .route(
            "/users/{id}",
            get(users::show)
                .put(users::update)
                .patch(users::update)
                .delete(users::destroy),
        )
}

/// Create car resource routes
fn car_routes() -> Router<FleetState> {
    Router::new()
        .route("/cars", get(cars::index).post(cars::store))
        .route(
            "/cars/{id}",
            get(cars::show)
                .put(cars::update)
                .patch(cars::update)
                .delete(cars::destroy),
        )
}

/// Create authentication routes
fn auth_routes() -> Router<FleetState> {
    Router::new().route("/login", post(auth::login))
}

/// Compose all fleet routes behind the response-shaping middleware
pub fn routes() -> Router<FleetState> {
    Router::new()
        .merge(user_routes())
        .merge(car_routes())
        .merge(auth_routes())
        .layer(middleware::from_fn(json_response))
}
