//! Repository implementations, one per sensor stream.

pub mod air_reading;
pub mod flame_event;
pub mod image_detection;

pub use air_reading::{AirReadingInput, AirReadingRepository};
pub use flame_event::{FlameEventInput, FlameEventRepository};
pub use image_detection::{ImageDetectionInput, ImageDetectionRepository};
