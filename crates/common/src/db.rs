//! Shared database types for Garage
//!
//! This module provides the error taxonomy the storage collaborators report
//! through, and its mapping onto the failure envelope.

use crate::error::Failure;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    /// Unique or foreign-key constraint violation. The driver's message is
    /// carried verbatim and surfaces unchanged in the envelope.
    #[error("{0}")]
    Conflict(String),

    #[error("database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<RepositoryError> for Failure {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Failure::not_found("record not found"),
            RepositoryError::Conflict(msg) => Failure::conflict(msg),
            RepositoryError::Connection(e) => Failure::storage(e.to_string()),
            RepositoryError::InvalidData(msg) => Failure::validation(msg),
        }
    }
}
