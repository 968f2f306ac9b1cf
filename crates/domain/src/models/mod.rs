//! Domain model definitions.

pub mod air_reading;
pub mod dashboard;
pub mod envelope;
pub mod flame_event;
pub mod image_detection;
pub mod stream;

pub use air_reading::AirReading;
pub use flame_event::{FlameEvent, FlameStatus};
pub use image_detection::ImageDetection;
pub use stream::Stream;
