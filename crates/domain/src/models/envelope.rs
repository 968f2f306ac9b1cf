//! Shared JSON response envelopes for the ingestion endpoints.

use serde::{Deserialize, Serialize};

/// Acknowledgement for a successful single-row ingestion.
///
/// Serializes as `{"status":"ok","inserted_id":<id>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestAck {
    pub status: String,
    pub inserted_id: i64,
}

impl IngestAck {
    pub fn new(inserted_id: i64) -> Self {
        Self {
            status: "ok".to_string(),
            inserted_id,
        }
    }
}
