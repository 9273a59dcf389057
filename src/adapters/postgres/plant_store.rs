//! PostgreSQL implementation of PlantStore.
//!
//! Plants live in the `plants` table (see `migrations/`). Identifiers are
//! drawn from `plant_id_seq` inside the INSERT itself, and the
//! `plants_name_key` unique constraint enforces name uniqueness.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::StorageConfig;
use crate::domain::{NewPlant, Plant, PlantId};
use crate::ports::{PlantStore, PlantStoreError};

const NAME_CONSTRAINT: &str = "plants_name_key";

/// PostgreSQL implementation of PlantStore.
#[derive(Clone)]
pub struct PostgresPlantStore {
    pool: PgPool,
}

impl PostgresPlantStore {
    /// Creates a new PostgresPlantStore over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the shared connection pool described by `config`.
    pub async fn connect(config: &StorageConfig) -> Result<Self, PlantStoreError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| {
                PlantStoreError::storage(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), PlantStoreError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to run migrations: {}", e)))
    }
}

#[async_trait]
impl PlantStore for PostgresPlantStore {
    async fn list_all(&self) -> Result<Vec<Plant>, PlantStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, other_names, light, humidity, water
            FROM plants
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PlantStoreError::storage(format!("Failed to fetch plants: {}", e)))?;

        let plants = rows.into_iter().map(row_to_plant).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = plants.len(), "Retrieved all plants from PostgreSQL");
        Ok(plants)
    }

    async fn get_by_id(&self, id: PlantId) -> Result<Plant, PlantStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, other_names, light, humidity, water
            FROM plants
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PlantStoreError::storage(format!("Failed to fetch plant: {}", e)))?;

        match row {
            Some(row) => row_to_plant(row),
            None => Err(PlantStoreError::NotFound(id)),
        }
    }

    async fn create(&self, plant: &NewPlant) -> Result<PlantId, PlantStoreError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO plants (id, name, other_names, light, humidity, water)
            VALUES (nextval('plant_id_seq'), $1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&plant.name)
        .bind(&plant.other_names)
        .bind(&plant.light)
        .bind(&plant.humidity)
        .bind(&plant.water)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, &plant.name, "insert"))?;

        tracing::debug!(id, name = %plant.name, "Inserted plant into PostgreSQL");
        Ok(PlantId::new(id))
    }

    async fn upsert(&self, id: PlantId, plant: &NewPlant) -> Result<(), PlantStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to begin transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO plants (id, name, other_names, light, humidity, water)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                other_names = EXCLUDED.other_names,
                light = EXCLUDED.light,
                humidity = EXCLUDED.humidity,
                water = EXCLUDED.water
            "#,
        )
        .bind(id.as_i64())
        .bind(&plant.name)
        .bind(&plant.other_names)
        .bind(&plant.light)
        .bind(&plant.humidity)
        .bind(&plant.water)
        .execute(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, &plant.name, "upsert"))?;

        // Keep the allocator ahead of explicitly chosen ids.
        sqlx::query(
            r#"
            SELECT setval('plant_id_seq', $1)
            FROM plant_id_seq
            WHERE $1 > CASE WHEN is_called THEN last_value ELSE last_value - 1 END
            "#,
        )
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| PlantStoreError::storage(format!("Failed to advance id sequence: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to commit upsert: {}", e)))?;

        tracing::debug!(%id, rows = result.rows_affected(), "Upserted plant into PostgreSQL");
        Ok(())
    }

    async fn delete_by_id(&self, id: PlantId) -> Result<(), PlantStoreError> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| PlantStoreError::storage(format!("Failed to delete plant: {}", e)))?;

        tracing::debug!(%id, deleted = result.rows_affected(), "Deleted plant in PostgreSQL");
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), PlantStoreError> {
        self.pool.close().await;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Maps a write failure to `Conflict` when the name constraint tripped.
fn classify_write_error(err: sqlx::Error, name: &str, operation: &str) -> PlantStoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(NAME_CONSTRAINT) {
            return PlantStoreError::name_conflict(name);
        }
    }
    PlantStoreError::storage(format!("Failed to {} plant: {}", operation, err))
}

fn row_to_plant(row: PgRow) -> Result<Plant, PlantStoreError> {
    let column_error =
        |column: &str, e: sqlx::Error| PlantStoreError::storage(format!("Failed to get {}: {}", column, e));

    let id: i64 = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let other_names: Vec<String> = row
        .try_get("other_names")
        .map_err(|e| column_error("other_names", e))?;
    let light: String = row.try_get("light").map_err(|e| column_error("light", e))?;
    let humidity: String = row.try_get("humidity").map_err(|e| column_error("humidity", e))?;
    let water: String = row.try_get("water").map_err(|e| column_error("water", e))?;

    Ok(Plant {
        id: PlantId::new(id),
        name,
        other_names,
        light,
        humidity,
        water,
    })
}
