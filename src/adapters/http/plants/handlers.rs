//! HTTP handlers for plant endpoints.
//!
//! Each handler parses the path id, then (for writes) decodes and validates
//! the body, calls one PlantStore operation and renders the outcome. This is
//! the only layer that logs store failures or chooses client-visible text.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{PlantId, ValidationError};
use crate::ports::{PlantStore, PlantStoreError};

use super::dto::{EmptyResponse, ErrorResponse, PlantRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlantsAppState {
    pub plant_store: Arc<dyn PlantStore>,
}

impl PlantsAppState {
    pub fn new(plant_store: Arc<dyn PlantStore>) -> Self {
        Self { plant_store }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /plants - List every plant
pub async fn list_plants(State(state): State<PlantsAppState>) -> Response {
    match state.plant_store.list_all().await {
        Ok(plants) => (StatusCode::OK, Json(plants)).into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// GET /plants/:id - Get one plant
pub async fn get_plant(
    State(state): State<PlantsAppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_plant_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.plant_store.get_by_id(id).await {
        Ok(plant) => {
            tracing::debug!(plant = %plant, "Plant retrieved");
            (StatusCode::OK, Json(plant)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// POST /plants - Create a plant
pub async fn create_plant(State(state): State<PlantsAppState>, body: Bytes) -> Response {
    let req = match parse_plant_request(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    if let Err(e) = req.validate(true) {
        return validation_failure(e);
    }

    let name = req.name.clone().unwrap_or_default();
    let plant = req.into_new_plant(name);

    match state.plant_store.create(&plant).await {
        Ok(id) => {
            tracing::info!(%id, name = %plant.name, "Plant created");
            (StatusCode::CREATED, Json(EmptyResponse {})).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// PUT /plants/:id - Replace or insert a plant under a fixed id
///
/// When the body omits `name`, the existing record's name is kept; a
/// missing record then leaves nothing to take the name from.
/// The lookup and the upsert are separate store calls, so a DELETE landing
/// between them re-creates the record under its old name.
pub async fn update_plant(
    State(state): State<PlantsAppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match parse_plant_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = match parse_plant_request(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    if let Err(e) = req.validate(false) {
        return validation_failure(e);
    }

    let name = match req.name.clone() {
        Some(name) => name,
        None => match state.plant_store.get_by_id(id).await {
            Ok(existing) => existing.name,
            Err(PlantStoreError::NotFound(_)) => {
                return validation_failure(ValidationError::single(
                    ValidationError::required_message("name"),
                ))
            }
            Err(e) => return handle_store_error(e),
        },
    };
    let plant = req.into_new_plant(name);

    match state.plant_store.upsert(id, &plant).await {
        Ok(()) => {
            tracing::info!(%id, name = %plant.name, "Plant upserted");
            (StatusCode::OK, Json(EmptyResponse {})).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// DELETE /plants/:id - Delete a plant (absent ids succeed)
pub async fn delete_plant(
    State(state): State<PlantsAppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_plant_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.plant_store.delete_by_id(id).await {
        Ok(()) => {
            tracing::info!(%id, "Plant deleted");
            (StatusCode::NO_CONTENT, Json(EmptyResponse {})).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request parsing
// ════════════════════════════════════════════════════════════════════════════

fn parse_plant_id(raw_id: &str) -> Result<PlantId, Response> {
    raw_id.parse::<PlantId>().map_err(|_| {
        tracing::warn!(raw_id, "Plant id is not an integer");
        error_response(StatusCode::BAD_REQUEST, ErrorResponse::INVALID_ID)
    })
}

fn parse_plant_request(body: &[u8]) -> Result<PlantRequest, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("The request body could not be parsed into a Plant: {}", e);
        error_response(StatusCode::BAD_REQUEST, ErrorResponse::INVALID_PAYLOAD)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn validation_failure(error: ValidationError) -> Response {
    tracing::warn!("The Plant request is invalid: {}", error);
    error_response(StatusCode::BAD_REQUEST, error.to_string())
}

fn handle_store_error(error: PlantStoreError) -> Response {
    match error {
        PlantStoreError::NotFound(id) => {
            tracing::warn!(%id, "The specified Plant was not found");
            error_response(StatusCode::NOT_FOUND, ErrorResponse::NOT_FOUND)
        }
        PlantStoreError::Conflict { key, value } => {
            let body = ErrorResponse::conflict(&key, &value);
            tracing::warn!("{}", body.error);
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        PlantStoreError::Storage(cause) => {
            tracing::error!("Plant store failure: {}", cause);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::INTERNAL)
        }
    }
}
