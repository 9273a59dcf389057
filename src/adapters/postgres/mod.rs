//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresPlantStore` - Plant records with sequence-allocated ids

mod plant_store;

pub use plant_store::PostgresPlantStore;
