//! Flame-event repository for database operations.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::entities::FlameEventEntity;
use crate::metrics::QueryTimer;

/// Input data for inserting a flame-detection event.
#[derive(Debug, Clone)]
pub struct FlameEventInput {
    /// 1 = fire detected, 0 = clear.
    pub status: i16,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Repository for flame-event database operations.
#[derive(Clone)]
pub struct FlameEventRepository {
    pool: PgPool,
}

impl FlameEventRepository {
    /// Creates a new FlameEventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single event and return the datastore-assigned id.
    pub async fn insert_event(&self, input: FlameEventInput) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("insert_flame_event");

        let result: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO flame_events (status, recorded_at, source)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.status)
        .bind(input.recorded_at)
        .bind(&input.source)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(result.0)
    }

    /// Get the most recent events, newest first.
    pub async fn get_recent(&self, limit: i64) -> Result<Vec<FlameEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_recent_flame_events");

        let result = sqlx::query_as::<_, FlameEventEntity>(
            r#"
            SELECT id, status, recorded_at, source
            FROM flame_events
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;

        timer.record();
        result
    }

    /// True if any fire-detected event was recorded at or after `cutoff`.
    pub async fn fire_detected_since(&self, cutoff: NaiveDateTime) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("flame_fire_detected_since");

        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM flame_events
            WHERE status = 1 AND recorded_at >= $1
            "#,
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(result.0 > 0)
    }
}
