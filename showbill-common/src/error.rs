//! Common error types for Showbill

use thiserror::Error;

/// Common result type for Showbill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Showbill crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested entity has no matching row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness or required-field violation on a write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A write references a nonexistent venue or artist
    #[error("Referential error: {0}")]
    Referential(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
