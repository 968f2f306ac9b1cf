//! Persistence layer for the IoT Monitor backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, one per sensor stream

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
