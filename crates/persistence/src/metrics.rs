//! Query duration metrics for the telemetry repositories.
//!
//! Every repository method times itself and reports under one histogram,
//! labeled with the query name (`insert_air_reading`, `get_recent_flame_events`,
//! `flame_fire_detected_since`, ...). Ingestion is one insert per device
//! request, so slow percentiles here point directly at datastore pressure.

use metrics::histogram;
use std::time::Instant;

/// Histogram receiving every repository query duration, in seconds.
pub const QUERY_DURATION_METRIC: &str = "database_query_duration_seconds";

/// Record one query duration under its query-name label.
pub fn record_query_duration(query_name: &str, duration_secs: f64) {
    histogram!(
        QUERY_DURATION_METRIC,
        "query" => query_name.to_string()
    )
    .record(duration_secs);
}

/// Times one repository query from construction to `record`.
///
/// Started before the statement is issued and recorded after it resolves,
/// whether the query succeeded or not; failed inserts count toward the
/// histogram too.
pub struct QueryTimer {
    query_name: String,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration and consume the timer.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(&self.query_name, duration);
    }
}
