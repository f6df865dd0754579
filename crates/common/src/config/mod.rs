//! Configuration management for Admission Guide services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - The legacy `MONGODB_URI` and `PORT` variables
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub url: String,

    /// Database holding all collections
    #[serde(default = "default_database_name")]
    pub name: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,

    /// Minimum number of pooled connections
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Collection names
    #[serde(default)]
    pub collections: CollectionNames,
}

/// Names of the four collections backing the API
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CollectionNames {
    #[serde(default = "default_public_universities")]
    pub public_universities: String,

    #[serde(default = "default_private_universities")]
    pub private_universities: String,

    #[serde(default = "default_users")]
    pub users: String,

    #[serde(default = "default_notes")]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Prometheus exporter port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name reported in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_request_timeout() -> u64 { 30 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_database_name() -> String { "admission_guide".to_string() }
fn default_max_pool_size() -> u32 { 10 }
fn default_min_pool_size() -> u32 { 0 }
fn default_connect_timeout() -> u64 { 10 }
fn default_public_universities() -> String { "publicUniversities".to_string() }
fn default_private_universities() -> String { "privateUniversities".to_string() }
fn default_users() -> String { "users".to_string() }
fn default_notes() -> String { "notes".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "admission-gateway".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__DATABASE__URL=mongodb://localhost:27017
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            // Plain MONGODB_URI and PORT win over everything else
            .set_override_option("database.url", std::env::var("MONGODB_URI").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?

            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            public_universities: default_public_universities(),
            private_universities: default_private_universities(),
            users: default_users(),
            notes: default_notes(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
                shutdown_timeout_secs: default_shutdown_timeout(),
            },
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                name: default_database_name(),
                max_pool_size: default_max_pool_size(),
                min_pool_size: default_min_pool_size(),
                connect_timeout_secs: default_connect_timeout(),
                collections: CollectionNames::default(),
            },
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.name, "admission_guide");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_collection_names() {
        let names = CollectionNames::default();
        assert_eq!(names.public_universities, "publicUniversities");
        assert_eq!(names.private_universities, "privateUniversities");
        assert_eq!(names.users, "users");
        assert_eq!(names.notes, "notes");
    }

    #[test]
    fn test_partial_database_section_fills_defaults() {
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "url": "mongodb://db:27017",
            "collections": { "notes": "suggestions" }
        }))
        .unwrap();

        assert_eq!(config.url, "mongodb://db:27017");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.collections.notes, "suggestions");
        assert_eq!(config.collections.users, "users");
    }
}
