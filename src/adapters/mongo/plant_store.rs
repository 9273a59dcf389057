//! MongoDB implementation of PlantStore.
//!
//! Each plant is one document whose `_id` is the plant id. A unique index on
//! `name` enforces name uniqueness, and ids come from a per-collection
//! sequence document in `counters` bumped with an atomic `$inc`.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::config::StorageConfig;
use crate::domain::{NewPlant, Plant, PlantId};
use crate::ports::{PlantStore, PlantStoreError};

const COUNTERS_COLLECTION: &str = "counters";
const NAME_INDEX: &str = "name_1";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Stored shape of a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlantDocument {
    #[serde(rename = "_id")]
    id: i64,
    name: String,
    #[serde(rename = "otherNames", default)]
    other_names: Vec<String>,
    light: String,
    humidity: String,
    water: String,
}

impl PlantDocument {
    fn from_new(id: PlantId, plant: &NewPlant) -> Self {
        Self {
            id: id.as_i64(),
            name: plant.name.clone(),
            other_names: plant.other_names.clone(),
            light: plant.light.clone(),
            humidity: plant.humidity.clone(),
            water: plant.water.clone(),
        }
    }
}

impl From<PlantDocument> for Plant {
    fn from(doc: PlantDocument) -> Self {
        Plant {
            id: PlantId::new(doc.id),
            name: doc.name,
            other_names: doc.other_names,
            light: doc.light,
            humidity: doc.humidity,
            water: doc.water,
        }
    }
}

/// MongoDB implementation of PlantStore.
#[derive(Clone)]
pub struct MongoPlantStore {
    client: Client,
    plants: Collection<PlantDocument>,
    counters: Collection<Document>,
    counter_key: String,
}

impl MongoPlantStore {
    /// Creates a store over an existing client.
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let db = client.database(database);
        Self {
            plants: db.collection::<PlantDocument>(collection),
            counters: db.collection::<Document>(COUNTERS_COLLECTION),
            counter_key: collection.to_string(),
            client,
        }
    }

    /// Connects, pings the primary and ensures the unique name index.
    pub async fn connect(config: &StorageConfig) -> Result<Self, PlantStoreError> {
        let mut options = ClientOptions::parse(&config.url).await.map_err(|e| {
            PlantStoreError::storage(format!("Failed to parse MongoDB URI: {}", e))
        })?;
        options.min_pool_size = Some(config.min_connections);
        options.max_pool_size = Some(config.max_connections);
        options.server_selection_timeout = Some(config.acquire_timeout());
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).map_err(|e| {
            PlantStoreError::storage(format!("Failed to create MongoDB client: {}", e))
        })?;

        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PlantStoreError::storage(format!("MongoDB ping failed: {}", e)))?;

        let store = Self::new(client, &config.database, &config.collection);
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Creates the unique index backing name uniqueness. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<(), PlantStoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(NAME_INDEX.to_string())
                    .build(),
            )
            .build();

        self.plants
            .create_index(index)
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to create name index: {}", e)))?;
        Ok(())
    }

    /// Atomically allocates the next plant id.
    async fn next_id(&self) -> Result<PlantId, PlantStoreError> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": self.counter_key.as_str() },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to allocate plant id: {}", e)))?
            .ok_or_else(|| PlantStoreError::storage("Plant id counter missing after upsert"))?;

        let seq = counter
            .get_i64("seq")
            .map_err(|e| PlantStoreError::storage(format!("Invalid plant id counter: {}", e)))?;
        Ok(PlantId::new(seq))
    }

    /// Moves the counter past an explicitly chosen id.
    async fn advance_counter(&self, id: PlantId) -> Result<(), PlantStoreError> {
        if id.as_i64() < PlantId::FIRST.as_i64() {
            return Ok(());
        }
        self.counters
            .update_one(
                doc! { "_id": self.counter_key.as_str() },
                doc! { "$max": { "seq": id.as_i64() } },
            )
            .upsert(true)
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to advance plant id counter: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl PlantStore for MongoPlantStore {
    async fn list_all(&self) -> Result<Vec<Plant>, PlantStoreError> {
        let cursor = self
            .plants
            .find(doc! {})
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to find plants: {}", e)))?;

        let documents: Vec<PlantDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to decode plants: {}", e)))?;

        tracing::debug!(count = documents.len(), "Retrieved all plants from MongoDB");
        Ok(documents.into_iter().map(Plant::from).collect())
    }

    async fn get_by_id(&self, id: PlantId) -> Result<Plant, PlantStoreError> {
        let document = self
            .plants
            .find_one(doc! { "_id": id.as_i64() })
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to find plant: {}", e)))?;

        document
            .map(Plant::from)
            .ok_or(PlantStoreError::NotFound(id))
    }

    async fn create(&self, plant: &NewPlant) -> Result<PlantId, PlantStoreError> {
        let id = self.next_id().await?;
        let document = PlantDocument::from_new(id, plant);

        self.plants
            .insert_one(&document)
            .await
            .map_err(|e| classify_write_error(e, &plant.name, "insert"))?;

        tracing::debug!(%id, name = %plant.name, "Inserted plant into MongoDB");
        Ok(id)
    }

    async fn upsert(&self, id: PlantId, plant: &NewPlant) -> Result<(), PlantStoreError> {
        let document = PlantDocument::from_new(id, plant);

        // Counter first: once the document is written the call must not fail,
        // and a create must never be handed this id.
        self.advance_counter(id).await?;
        let result = self
            .plants
            .replace_one(doc! { "_id": id.as_i64() }, &document)
            .upsert(true)
            .await
            .map_err(|e| classify_write_error(e, &plant.name, "upsert"))?;

        tracing::debug!(
            %id,
            modified = result.modified_count,
            upserted = result.upserted_id.is_some(),
            "Upserted plant into MongoDB"
        );
        Ok(())
    }

    async fn delete_by_id(&self, id: PlantId) -> Result<(), PlantStoreError> {
        let result = self
            .plants
            .delete_one(doc! { "_id": id.as_i64() })
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to delete plant: {}", e)))?;

        tracing::debug!(%id, deleted = result.deleted_count, "Deleted plant in MongoDB");
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), PlantStoreError> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// True when a write error is a duplicate key on the unique `name` index.
///
/// Duplicate `_id` values also report E11000 and are not name conflicts.
fn is_name_conflict(write_error: &WriteError) -> bool {
    write_error.code == DUPLICATE_KEY_CODE
        && write_error
            .message
            .contains(&format!("index: {} ", NAME_INDEX))
}

fn classify_write_error(err: mongodb::error::Error, name: &str, operation: &str) -> PlantStoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if is_name_conflict(write_error) => {
            PlantStoreError::name_conflict(name)
        }
        _ => PlantStoreError::storage(format!("Failed to {} plant: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn fern() -> NewPlant {
        NewPlant {
            name: "Boston Fern".to_string(),
            other_names: vec!["Sword fern".to_string()],
            light: "indirect".to_string(),
            humidity: "high".to_string(),
            water: "often".to_string(),
        }
    }

    #[test]
    fn document_uses_plant_id_as_underscore_id() {
        let document = PlantDocument::from_new(PlantId::new(4), &fern());
        let bson_doc = bson::to_document(&document).unwrap();

        assert_eq!(bson_doc.get_i64("_id").unwrap(), 4);
        assert_eq!(bson_doc.get_str("name").unwrap(), "Boston Fern");
        assert!(bson_doc.get_array("otherNames").is_ok());
        assert!(!bson_doc.contains_key("id"));
    }

    #[test]
    fn document_converts_back_to_plant() {
        let document = PlantDocument::from_new(PlantId::new(4), &fern());
        let plant = Plant::from(document);
        assert_eq!(plant, fern().with_id(PlantId::new(4)));
    }

    #[test]
    fn document_without_other_names_decodes_to_empty_list() {
        let raw = doc! {
            "_id": 9_i64,
            "name": "Aloe",
            "light": "low",
            "humidity": "low",
            "water": "low",
        };
        let document: PlantDocument = bson::from_document(raw).unwrap();
        assert!(document.other_names.is_empty());
    }

    fn duplicate_key_error(index: &str, key: &str) -> mongodb::error::Error {
        let write_error: WriteError = bson::from_document(doc! {
            "code": DUPLICATE_KEY_CODE,
            "codeName": "DuplicateKey",
            "errmsg": format!(
                "E11000 duplicate key error collection: plants.plants index: {} dup key: {{ {}: 7 }}",
                index, key
            ),
        })
        .unwrap();
        ErrorKind::Write(WriteFailure::WriteError(write_error)).into()
    }

    #[test]
    fn duplicate_name_is_a_name_conflict() {
        let err = classify_write_error(duplicate_key_error("name_1", "name"), "Aloe", "insert");
        assert_eq!(err, PlantStoreError::name_conflict("Aloe"));
    }

    #[test]
    fn duplicate_id_is_a_storage_error() {
        let err = classify_write_error(duplicate_key_error("_id_", "_id"), "Aloe", "insert");
        assert!(matches!(err, PlantStoreError::Storage(ref msg) if msg.starts_with("Failed to insert plant")));
    }

    #[test]
    fn other_write_errors_are_storage_errors() {
        let write_error: WriteError = bson::from_document(doc! {
            "code": 121,
            "errmsg": "Document failed validation",
        })
        .unwrap();
        let err = classify_write_error(
            ErrorKind::Write(WriteFailure::WriteError(write_error)).into(),
            "Aloe",
            "upsert",
        );
        assert!(matches!(err, PlantStoreError::Storage(_)));
    }

    #[test]
    fn mongo_store_is_a_plant_store() {
        fn _assert_impl<T: PlantStore>() {}
        _assert_impl::<MongoPlantStore>();
    }
}
