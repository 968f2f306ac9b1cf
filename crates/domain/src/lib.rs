//! Domain layer for the IoT Monitor backend.
//!
//! This crate contains:
//! - Domain models (AirReading, FlameEvent, ImageDetection)
//! - Request/response payload types for the ingestion and query endpoints
//! - Dashboard summary types

pub mod models;
