//! Plant store port.
//!
//! Defines the persistence contract for plant records. Every backend
//! (in-memory, PostgreSQL, MongoDB) implements this trait and classifies its
//! own failures into [`PlantStoreError`].
//!
//! # Design
//!
//! - **No retries**: every failure is returned to the caller immediately
//! - **No logging of errors**: stores classify and return, callers decide
//! - **Backend-enforced invariants**: `name` uniqueness and identifier
//!   allocation are delegated to the backend's atomic primitives

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewPlant, Plant, PlantId};

/// Errors that can occur during plant store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlantStoreError {
    #[error("Plant not found: {0}")]
    NotFound(PlantId),

    #[error("Conflicting key: {key}, conflicting value: {value}")]
    Conflict { key: String, value: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlantStoreError {
    /// Creates a conflict on the unique `name` field.
    pub fn name_conflict(name: impl Into<String>) -> Self {
        PlantStoreError::Conflict {
            key: "name".to_string(),
            value: name.into(),
        }
    }

    /// Wraps any other backend failure.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        PlantStoreError::Storage(cause.to_string())
    }
}

/// Repository port for plant persistence.
///
/// Implementations must be safe to call concurrently; they rely on the
/// backend for atomicity rather than in-process locking across calls.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Return every stored plant in store-native order.
    ///
    /// An empty collection yields an empty vector.
    ///
    /// # Errors
    ///
    /// - `Storage` on backend failure
    async fn list_all(&self) -> Result<Vec<Plant>, PlantStoreError>;

    /// Fetch one plant by identifier.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has that id
    /// - `Storage` on backend failure
    async fn get_by_id(&self, id: PlantId) -> Result<Plant, PlantStoreError>;

    /// Insert a new plant and return its freshly allocated identifier.
    ///
    /// Sequential creates on an empty store receive 1, 2, 3, ...
    ///
    /// # Errors
    ///
    /// - `Conflict { key: "name", .. }` if a plant with that name exists
    /// - `Storage` on backend failure
    async fn create(&self, plant: &NewPlant) -> Result<PlantId, PlantStoreError>;

    /// Replace the plant with this id in full, or insert it under exactly
    /// this id if absent. Repeating the call leaves the same final state.
    ///
    /// # Errors
    ///
    /// - `Conflict { key: "name", .. }` if a *different* record holds the name
    /// - `Storage` on backend failure
    async fn upsert(&self, id: PlantId, plant: &NewPlant) -> Result<(), PlantStoreError>;

    /// Remove the plant with this id. Removing an absent id succeeds.
    ///
    /// # Errors
    ///
    /// - `Storage` on backend failure
    async fn delete_by_id(&self, id: PlantId) -> Result<(), PlantStoreError>;

    /// Release the backend connection. Called once at shutdown, best-effort.
    async fn disconnect(&self) -> Result<(), PlantStoreError> {
        Ok(())
    }
}
