//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - Process-local PlantStore
//! - `postgres` - PlantStore on PostgreSQL (sqlx)
//! - `mongo` - PlantStore on MongoDB
//! - `http` - REST API (axum)

pub mod http;
pub mod memory;
pub mod mongo;
pub mod postgres;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::{PlantStore, PlantStoreError};

pub use memory::InMemoryPlantStore;
pub use mongo::MongoPlantStore;
pub use postgres::PostgresPlantStore;

/// Opens the store selected by configuration.
///
/// Called once at startup; the returned handle is shared by every request.
pub async fn connect_plant_store(
    config: &StorageConfig,
) -> Result<Arc<dyn PlantStore>, PlantStoreError> {
    let store: Arc<dyn PlantStore> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryPlantStore::new()),
        StorageBackend::Postgres => {
            let store = PostgresPlantStore::connect(config).await?;
            if config.run_migrations {
                store.migrate().await?;
            }
            Arc::new(store)
        }
        StorageBackend::Mongo => Arc::new(MongoPlantStore::connect(config).await?),
    };
    Ok(store)
}
