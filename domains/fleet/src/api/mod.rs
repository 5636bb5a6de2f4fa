//! API layer for the fleet domain
//!
//! Contains HTTP handlers, routes, middleware, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::FleetState;
pub use routes::routes;
