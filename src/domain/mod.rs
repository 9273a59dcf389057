//! Domain layer containing the plant record and its value objects.
//!
//! # Module Organization
//!
//! - `ids` - The store-assigned `PlantId`
//! - `plant` - `Plant` and the client-supplied `NewPlant` fields
//! - `errors` - Input validation errors

mod errors;
mod ids;
mod plant;

pub use errors::ValidationError;
pub use ids::PlantId;
pub use plant::{NewPlant, Plant};
