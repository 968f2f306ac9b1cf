//! Image-detection domain model and endpoint payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents one stored camera snapshot.
///
/// The payload is persisted redundantly: the original base64 text in the
/// `value` column and the decoded bytes as a file referenced by `image_path`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageDetection {
    pub id: i64,
    pub value: String,
    pub image_path: String,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Parameters for image ingestion, accepted from the query string (GET) or
/// an urlencoded form body (POST).
#[derive(Debug, Clone, Deserialize)]
pub struct IngestImageParams {
    pub api_key: Option<String>,
    /// Base64-encoded image payload.
    pub value: Option<String>,
    pub source: Option<String>,
    pub ts: Option<String>,
}

/// Acknowledgement returned after a successful image ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageIngestAck {
    pub status: String,
    pub message: String,
    pub file: String,
    pub inserted_id: i64,
}

impl ImageIngestAck {
    pub fn new(file: String, inserted_id: i64) -> Self {
        Self {
            status: "ok".to_string(),
            message: "Image stored successfully".to_string(),
            file,
            inserted_id,
        }
    }
}
