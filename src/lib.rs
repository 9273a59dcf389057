//! Plants API - Plant record management service
//!
//! Exposes plant records over HTTP and persists them through a pluggable
//! `PlantStore` (in-memory, PostgreSQL or MongoDB).

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
