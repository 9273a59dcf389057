//! In-Memory Plant Store Adapter
//!
//! Keeps plants in a map behind a single lock. Identifier allocation and the
//! name-uniqueness check run under the same write guard, so concurrent
//! creates never observe the same next id.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{NewPlant, Plant, PlantId};
use crate::ports::{PlantStore, PlantStoreError};

#[derive(Debug, Default)]
struct Collection {
    plants: BTreeMap<PlantId, Plant>,
    /// Highest id ever stored; survives deletion so ids are never reissued.
    last_id: i64,
}

impl Collection {
    fn name_taken_by_other(&self, name: &str, id: Option<PlantId>) -> bool {
        self.plants
            .values()
            .any(|p| p.name == name && Some(p.id) != id)
    }
}

/// In-memory storage for plants
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlantStore {
    inner: Arc<RwLock<Collection>>,
}

impl InMemoryPlantStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored plants
    pub async fn len(&self) -> usize {
        self.inner.read().await.plants.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.plants.is_empty()
    }
}

#[async_trait]
impl PlantStore for InMemoryPlantStore {
    async fn list_all(&self) -> Result<Vec<Plant>, PlantStoreError> {
        let collection = self.inner.read().await;
        Ok(collection.plants.values().cloned().collect())
    }

    async fn get_by_id(&self, id: PlantId) -> Result<Plant, PlantStoreError> {
        let collection = self.inner.read().await;
        collection
            .plants
            .get(&id)
            .cloned()
            .ok_or(PlantStoreError::NotFound(id))
    }

    async fn create(&self, plant: &NewPlant) -> Result<PlantId, PlantStoreError> {
        let mut collection = self.inner.write().await;
        if collection.name_taken_by_other(&plant.name, None) {
            return Err(PlantStoreError::name_conflict(&plant.name));
        }

        let id = PlantId::new(collection.last_id)
            .next()
            .ok_or_else(|| PlantStoreError::storage("Plant id space exhausted"))?;
        collection.last_id = id.as_i64();
        collection.plants.insert(id, plant.clone().with_id(id));

        tracing::debug!(%id, "Inserted plant into memory store");
        Ok(id)
    }

    async fn upsert(&self, id: PlantId, plant: &NewPlant) -> Result<(), PlantStoreError> {
        let mut collection = self.inner.write().await;
        if collection.name_taken_by_other(&plant.name, Some(id)) {
            return Err(PlantStoreError::name_conflict(&plant.name));
        }

        collection.last_id = collection.last_id.max(id.as_i64());
        collection.plants.insert(id, plant.clone().with_id(id));

        tracing::debug!(%id, "Upserted plant into memory store");
        Ok(())
    }

    async fn delete_by_id(&self, id: PlantId) -> Result<(), PlantStoreError> {
        let removed = self.inner.write().await.plants.remove(&id);
        tracing::debug!(%id, removed = removed.is_some(), "Deleted plant from memory store");
        Ok(())
    }
}
