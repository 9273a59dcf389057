//! MongoDB adapters - Document-store implementations for repository ports.
//!
//! - `MongoPlantStore` - Plant records keyed by integer `_id`

mod plant_store;

pub use plant_store::MongoPlantStore;
