//! Image-detection entity (database row mapping).

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database row mapping for the `cow_detections` table.
///
/// The original base64 payload lives in `value`; the decoded bytes are kept
/// on disk at the relative `image_path`. The two are written in separate
/// steps with a compensating file delete if the insert fails.
#[derive(Debug, Clone, FromRow)]
pub struct ImageDetectionEntity {
    pub id: i64,
    pub value: String,
    pub image_path: String,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

impl From<ImageDetectionEntity> for domain::models::ImageDetection {
    fn from(entity: ImageDetectionEntity) -> Self {
        domain::models::ImageDetection {
            id: entity.id,
            value: entity.value,
            image_path: entity.image_path,
            recorded_at: entity.recorded_at,
            source: entity.source,
        }
    }
}
