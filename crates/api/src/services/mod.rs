//! Supporting services for the route handlers.

pub mod image_store;

pub use image_store::ImageStore;
