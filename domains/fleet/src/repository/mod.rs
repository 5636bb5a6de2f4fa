//! Storage collaborators for the fleet domain
//!
//! Handlers consume these traits through injected trait objects; the
//! PostgreSQL implementations live in `users`/`cars`, the in-memory one in
//! `memory`. All consistency rules (uniqueness, referential integrity,
//! cascade delete) are the implementations' responsibility.

pub mod cars;
pub mod memory;
pub mod users;

use async_trait::async_trait;
use garage_common::{PageBounds, RepositoryError};

use crate::domain::entities::{
    Car, CarPatch, CarWithUser, NewCar, NewUser, User, UserPatch, UserWithCars,
};

pub use cars::PgCarStore;
pub use memory::MemoryStore;
pub use users::PgUserStore;

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Data-access collaborator for users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// One page of users, each with their cars eagerly attached
    async fn page_with_cars(&self, bounds: PageBounds) -> RepoResult<Vec<UserWithCars>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn create(&self, attrs: NewUser) -> RepoResult<User>;

    /// Apply a partial update; `NotFound` when the id does not resolve
    async fn update(&self, id: i64, patch: UserPatch) -> RepoResult<User>;

    /// Delete a user and, by cascade, their cars
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

/// Data-access collaborator for cars
#[async_trait]
pub trait CarStore: Send + Sync {
    /// One page of cars, each with its owner eagerly attached
    async fn page_with_user(&self, bounds: PageBounds) -> RepoResult<Vec<CarWithUser>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>>;

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Car>>;

    async fn create(&self, attrs: NewCar) -> RepoResult<Car>;

    /// Apply a partial update; `NotFound` when the id does not resolve
    async fn update(&self, id: i64, patch: CarPatch) -> RepoResult<Car>;

    async fn delete(&self, id: i64) -> RepoResult<()>;
}

/// Classify a sqlx error, keeping constraint-violation messages verbatim
pub(crate) fn constraint_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() || db.is_foreign_key_violation() {
            return RepositoryError::Conflict(db.message().to_string());
        }
    }
    RepositoryError::Connection(e)
}
