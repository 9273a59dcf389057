//! HTTP adapter for plant endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{EmptyResponse, ErrorResponse, PlantRequest};
pub use handlers::PlantsAppState;
pub use routes::plants_router;
