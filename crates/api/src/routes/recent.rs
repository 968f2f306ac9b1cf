//! Recent-rows query endpoint handler.

use axum::{
    extract::{Query, State},
    Json,
};
use persistence::repositories::{AirReadingRepository, FlameEventRepository};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::air_reading::RecentAirRow;
use domain::models::flame_event::RecentFlameRow;
use domain::models::stream::{RecentRow, RecentRowsQuery, Stream, RECENT_ROWS_LIMIT};

/// Return the most recent rows for one stream as a bare JSON array.
///
/// GET /api/v1/recent?stream=air|flame
///
/// Air rows come back oldest-to-newest (chart time axis); flame rows
/// newest-to-oldest (event list). Fixed cap of 200 rows, no pagination.
pub async fn recent_rows(
    State(state): State<AppState>,
    Query(query): Query<RecentRowsQuery>,
) -> Result<Json<Vec<RecentRow>>, ApiError> {
    let stream = query
        .stream()
        .ok_or_else(|| ApiError::Validation("stream must be 'air' or 'flame'".to_string()))?;

    let rows = match stream {
        Stream::Air => {
            let repo = AirReadingRepository::new(state.pool.clone());
            let mut entities = repo.get_recent(RECENT_ROWS_LIMIT).await?;
            // Fetched newest-first; the chart wants chronological order
            entities.reverse();
            entities
                .into_iter()
                .map(|e| {
                    let row: RecentAirRow = domain::models::AirReading::from(e).into();
                    RecentRow::Air(row)
                })
                .collect::<Vec<_>>()
        }
        Stream::Flame => {
            let repo = FlameEventRepository::new(state.pool.clone());
            let entities = repo.get_recent(RECENT_ROWS_LIMIT).await?;
            entities
                .into_iter()
                .map(|e| {
                    let row: RecentFlameRow = domain::models::FlameEvent::from(e).into();
                    RecentRow::Flame(row)
                })
                .collect::<Vec<_>>()
        }
    };

    info!(stream = ?stream, count = rows.len(), "Recent rows served");

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_rows_serialize_as_bare_array() {
        let rows = vec![RecentRow::Air(RecentAirRow {
            id: 1,
            value: "42.5".to_string(),
            recorded_at: "2024-05-01 12:00:00".to_string(),
        })];
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"value\":\"42.5\""));
    }

    #[test]
    fn test_flame_rows_serialize_with_status_field() {
        let rows = vec![RecentRow::Flame(RecentFlameRow {
            id: 2,
            status: 0,
            recorded_at: "2024-05-01 12:00:00".to_string(),
        })];
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.contains("\"status\":0"));
        assert!(!json.contains("\"value\""));
    }
}
