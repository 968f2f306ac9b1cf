//! Flame-detection event entity (database row mapping).

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database row mapping for the `flame_events` table.
#[derive(Debug, Clone, FromRow)]
pub struct FlameEventEntity {
    pub id: i64,
    /// SMALLINT: 1 = fire detected, 0 = clear.
    pub status: i16,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

impl From<FlameEventEntity> for domain::models::FlameEvent {
    fn from(entity: FlameEventEntity) -> Self {
        domain::models::FlameEvent {
            id: entity.id,
            status: entity.status,
            recorded_at: entity.recorded_at,
            source: entity.source,
        }
    }
}
