//! Storage backend configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Which PlantStore implementation to run against
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store; contents are lost on restart
    #[default]
    Memory,
    Postgres,
    Mongo,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
            Self::Mongo => write!(f, "mongo"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: StorageBackend,

    /// Connection URL (unused by the memory backend)
    #[serde(default)]
    pub url: String,

    /// MongoDB database name
    #[serde(default = "default_database")]
    pub database: String,

    /// MongoDB collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire / server selection timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup (postgres only)
    #[serde(default)]
    pub run_migrations: bool,
}

impl StorageConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::Memory => return Ok(()),
            StorageBackend::Postgres => {
                if self.url.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__URL"));
                }
                if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidStorageUrl("postgres"));
                }
            }
            StorageBackend::Mongo => {
                if self.url.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__URL"));
                }
                if !self.url.starts_with("mongodb://") && !self.url.starts_with("mongodb+srv://") {
                    return Err(ValidationError::InvalidStorageUrl("mongo"));
                }
                if self.database.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__DATABASE"));
                }
                if self.collection.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__COLLECTION"));
                }
            }
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            database: default_database(),
            collection: default_collection(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_database() -> String {
    "plants".to_string()
}

fn default_collection() -> String {
    "plants".to_string()
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    20
}

fn default_acquire_timeout() -> u64 {
    30
}
