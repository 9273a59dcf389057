//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own HTTP adapter for endpoint exposure; [`app`]
//! assembles them with request tracing into the service router.

pub mod plants;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::ports::PlantStore;

pub use plants::{plants_router, PlantsAppState};

/// Builds the complete service router over a shared store.
pub fn app(plant_store: Arc<dyn PlantStore>) -> Router {
    plants_router()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(PlantsAppState::new(plant_store))
}
