//! Air-quality reading domain model and endpoint payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents one air-quality reading.
#[derive(Debug, Clone, Serialize)]
pub struct AirReading {
    pub id: i64,
    pub value: f64,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Query parameters for air-quality ingestion.
///
/// Every field is optional at the transport level so that missing parameters
/// surface as the documented JSON error envelope rather than a framework
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestAirParams {
    pub api_key: Option<String>,
    pub value: Option<String>,
    pub source: Option<String>,
    pub ts: Option<String>,
}

impl IngestAirParams {
    /// Parses the required `value` parameter as a number.
    pub fn parsed_value(&self) -> Option<f64> {
        self.value
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

/// One row of the recent-air projection served to the dashboard chart.
///
/// `value` is rendered as its decimal string form and `recorded_at` in the
/// `YYYY-MM-DD HH:MM:SS` display format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentAirRow {
    pub id: i64,
    pub value: String,
    pub recorded_at: String,
}

impl From<AirReading> for RecentAirRow {
    fn from(reading: AirReading) -> Self {
        Self {
            id: reading.id,
            value: reading.value.to_string(),
            recorded_at: shared::timestamp::format_recorded_at(reading.recorded_at),
        }
    }
}
