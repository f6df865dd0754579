//! Database layer for Admission Guide
//!
//! Provides:
//! - Document models
//! - Repository trait for data access
//! - MongoDB and in-memory repository implementations
//! - Connection pool management

mod memory;
pub mod models;
mod mongo;
mod repository;

pub use memory::MemoryRepository;
pub use mongo::MongoRepository;
pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use std::time::Duration;
use tracing::info;

/// Application name reported to the MongoDB server
const APP_NAME: &str = "admission-guide";

/// MongoDB client wrapper. The driver keeps its own connection pool.
#[derive(Clone)]
pub struct DbPool {
    client: Client,
    database: Database,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!(database = %config.name, "Connecting to MongoDB...");

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Invalid connection string: {}", e),
            })?;
        options.app_name = Some(APP_NAME.to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));

        let client = Client::with_options(options).map_err(|e| AppError::DatabaseConnection {
            message: format!("Failed to create client: {}", e),
        })?;
        let database = client.database(&config.name);

        let pool = Self { client, database };
        pool.ping().await?;

        info!("Database connection established");

        Ok(pool)
    }

    /// The configured database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }

    /// Close all pooled connections
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
