//! Shared utilities for the IoT Monitor backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Shared-secret verification for device callers
//! - Timestamp normalization for telemetry submissions

pub mod secret;
pub mod timestamp;
