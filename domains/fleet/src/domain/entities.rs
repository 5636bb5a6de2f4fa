//! Domain entities for the fleet domain
//!
//! Users own cars; both are created and destroyed only through the resource
//! handlers. Column widths mirror the storage schema.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Allowed field set for user submissions
pub const USER_FIELDS: [&str; 3] = ["name", "email", "password"];

/// Allowed field set for car submissions
pub const CAR_FIELDS: [&str; 6] = ["name", "color", "brand", "year", "plate", "user_id"];

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across the collection
    pub email: String,
    /// Hashed at rest; never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Car entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub brand: String,
    /// Fixed-width model year, e.g. "1998"
    pub year: String,
    /// Unique across the collection
    pub plate: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user with their cars eagerly attached
#[derive(Debug, Clone, Serialize)]
pub struct UserWithCars {
    #[serde(flatten)]
    pub user: User,
    pub cars: Vec<Car>,
}

/// A car with its owner eagerly attached
#[derive(Debug, Clone, Serialize)]
pub struct CarWithUser {
    #[serde(flatten)]
    pub car: Car,
    pub user: User,
}

/// Attributes for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update for a user; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Attributes for creating a car
#[derive(Debug, Clone)]
pub struct NewCar {
    pub name: String,
    pub color: String,
    pub brand: String,
    pub year: String,
    pub plate: String,
    pub user_id: i64,
}

/// Partial update for a car; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct CarPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub year: Option<String>,
    pub plate: Option<String>,
    pub user_id: Option<i64>,
}
