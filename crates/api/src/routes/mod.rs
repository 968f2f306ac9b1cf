//! HTTP route handlers.

pub mod dashboard;
pub mod health;
pub mod ingest;
pub mod recent;
