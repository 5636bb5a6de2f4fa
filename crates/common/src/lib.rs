//! Shared utilities, configuration, and error handling for Garage
//!
//! This crate provides common functionality used across the Garage application:
//! - Configuration management following 12-factor principles
//! - The failure envelope returned by every endpoint
//! - Field presence diffing for submitted bodies
//! - Password hashing
//! - Pagination header extraction

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod fields;

pub use config::Config;
pub use crypto::{PasswordHasher, SaltedSha256};
pub use db::RepositoryError;
pub use error::{Failure, FailureKind, Result};
pub use extractors::PageBounds;
pub use fields::{missing_fields, pick};
