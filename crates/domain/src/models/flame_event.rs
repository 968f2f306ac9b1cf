//! Flame-detection event domain model and endpoint payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents one flame-detection event.
#[derive(Debug, Clone, Serialize)]
pub struct FlameEvent {
    pub id: i64,
    /// 1 = fire detected, 0 = clear.
    pub status: i16,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Boolean flame status as submitted by devices.
///
/// The wire format is restricted to the literal set `0`, `1`, `00`, `01`;
/// firmware pads the digit depending on the UART frame it happens to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameStatus {
    Clear,
    Fire,
}

impl FlameStatus {
    /// Parses a caller-supplied status token against the accepted literal set.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "0" | "00" => Some(FlameStatus::Clear),
            "1" | "01" => Some(FlameStatus::Fire),
            _ => None,
        }
    }

    /// Integer form stored in the `status` column.
    pub fn as_i16(self) -> i16 {
        match self {
            FlameStatus::Clear => 0,
            FlameStatus::Fire => 1,
        }
    }
}

/// Query parameters for flame-event ingestion.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestFlameParams {
    pub api_key: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub ts: Option<String>,
}

/// One row of the recent-flame projection served to the event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFlameRow {
    pub id: i64,
    pub status: i16,
    pub recorded_at: String,
}

impl From<FlameEvent> for RecentFlameRow {
    fn from(event: FlameEvent) -> Self {
        Self {
            id: event.id,
            status: event.status,
            recorded_at: shared::timestamp::format_recorded_at(event.recorded_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_literals() {
        assert_eq!(FlameStatus::parse("0"), Some(FlameStatus::Clear));
        assert_eq!(FlameStatus::parse("00"), Some(FlameStatus::Clear));
        assert_eq!(FlameStatus::parse("1"), Some(FlameStatus::Fire));
        assert_eq!(FlameStatus::parse("01"), Some(FlameStatus::Fire));
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for token in ["2", "true", "false", "10", "011", "", " 1", "1 ", "on"] {
            assert_eq!(FlameStatus::parse(token), None, "token {:?}", token);
        }
    }

    #[test]
    fn test_as_i16() {
        assert_eq!(FlameStatus::Clear.as_i16(), 0);
        assert_eq!(FlameStatus::Fire.as_i16(), 1);
    }

    #[test]
    fn test_recent_row_projection() {
        let event = FlameEvent {
            id: 3,
            status: 1,
            recorded_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 15, 0)
                .unwrap(),
            source: None,
        };
        let row: RecentFlameRow = event.into();
        assert_eq!(row.id, 3);
        assert_eq!(row.status, 1);
        assert_eq!(row.recorded_at, "2024-05-01 08:15:00");
    }

    #[test]
    fn test_recent_row_serialization() {
        let row = RecentFlameRow {
            id: 3,
            status: 1,
            recorded_at: "2024-05-01 08:15:00".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"status\":1"));
        assert!(json.contains("\"recorded_at\":\"2024-05-01 08:15:00\""));
    }
}
