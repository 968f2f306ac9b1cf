//! Stream selector and row projection for the recent-rows query.

use serde::{Deserialize, Serialize};

use crate::models::air_reading::RecentAirRow;
use crate::models::flame_event::RecentFlameRow;

/// Fixed row cap for recent-rows queries; no pagination beyond this.
pub const RECENT_ROWS_LIMIT: i64 = 200;

/// One sensor category with its own table and ingestion/query pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Air,
    Flame,
}

/// Query parameters for the recent-rows endpoint.
///
/// The selector is optional at the transport level so a missing or unknown
/// stream produces the documented error envelope instead of a framework
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentRowsQuery {
    pub stream: Option<String>,
}

impl RecentRowsQuery {
    /// Resolves the stream selector, if it names a known stream.
    pub fn stream(&self) -> Option<Stream> {
        match self.stream.as_deref() {
            Some("air") => Some(Stream::Air),
            Some("flame") => Some(Stream::Flame),
            _ => None,
        }
    }
}

/// One projected row of either stream, serialized without a tag so the
/// endpoint returns a bare array of row objects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecentRow {
    Air(RecentAirRow),
    Flame(RecentFlameRow),
}
