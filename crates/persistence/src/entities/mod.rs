//! Database entity definitions (row mappings).

pub mod air_reading;
pub mod flame_event;
pub mod image_detection;

pub use air_reading::AirReadingEntity;
pub use flame_event::FlameEventEntity;
pub use image_detection::ImageDetectionEntity;
