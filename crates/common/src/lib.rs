//! Admission Guide Common Library
//!
//! Shared code for the Admission Guide gateway and client including:
//! - Document models and the repository abstraction (MongoDB and in-memory)
//! - Wire types for the REST API
//! - Error types and handling
//! - Configuration management
//! - Password hashing
//! - Metrics helpers

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use db::{MemoryRepository, MongoRepository, Repository};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
