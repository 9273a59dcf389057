//! HTTP routes for plant endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_plant, delete_plant, get_plant, list_plants, update_plant, PlantsAppState,
};

/// Creates the plant router with all endpoints.
///
/// Routes:
/// - `GET /plants` - List plants
/// - `POST /plants` - Create a plant
/// - `GET /plants/:id` - Get a plant
/// - `PUT /plants/:id` - Replace or insert a plant
/// - `DELETE /plants/:id` - Delete a plant
pub fn plants_router() -> Router<PlantsAppState> {
    Router::new()
        .route("/plants", get(list_plants).post(create_plant))
        .route(
            "/plants/:id",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
}
