//! In-memory adapters.
//!
//! - `InMemoryPlantStore` - Process-local plant store for tests and development

mod plant_store;

pub use plant_store::InMemoryPlantStore;
