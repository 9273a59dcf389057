//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PlantStore` - Persistence of plant records

mod plant_store;

pub use plant_store::{PlantStore, PlantStoreError};
