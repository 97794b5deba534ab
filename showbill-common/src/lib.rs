//! # Showbill Common Library
//!
//! Shared code for the Showbill booking directory:
//! - Database schema, models, and the query/mutation layers
//! - Error types
//! - Configuration and root folder resolution

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
