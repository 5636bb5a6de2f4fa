//! Fleet domain: users, their cars, and password-check authentication

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Car, CarPatch, CarWithUser, NewCar, NewUser, User, UserPatch, UserWithCars, CAR_FIELDS,
    USER_FIELDS,
};
// Re-export repository types
pub use repository::{CarStore, MemoryStore, PgCarStore, PgUserStore, RepoResult, UserStore};

// Re-export API types
pub use api::routes;
pub use api::FleetState;
