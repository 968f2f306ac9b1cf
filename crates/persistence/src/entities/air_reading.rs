//! Air-quality reading entity (database row mapping).

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database row mapping for the `air_quality` table.
///
/// `recorded_at` is a TIMESTAMP without timezone marker; caller and server
/// share a timezone convention.
#[derive(Debug, Clone, FromRow)]
pub struct AirReadingEntity {
    pub id: i64,
    pub value: f64,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

impl From<AirReadingEntity> for domain::models::AirReading {
    fn from(entity: AirReadingEntity) -> Self {
        domain::models::AirReading {
            id: entity.id,
            value: entity.value,
            recorded_at: entity.recorded_at,
            source: entity.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entity() -> AirReadingEntity {
        AirReadingEntity {
            id: 1,
            value: 42.5,
            recorded_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            source: Some("dev1".to_string()),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let reading: domain::models::AirReading = entity().into();
        assert_eq!(reading.id, 1);
        assert_eq!(reading.value, 42.5);
        assert_eq!(reading.source.as_deref(), Some("dev1"));
    }

    #[test]
    fn test_entity_without_source() {
        let mut e = entity();
        e.source = None;
        let reading: domain::models::AirReading = e.into();
        assert!(reading.source.is_none());
    }
}
