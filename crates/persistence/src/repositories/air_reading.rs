//! Air-quality repository for database operations.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::entities::AirReadingEntity;
use crate::metrics::QueryTimer;

/// Input data for inserting an air-quality reading.
#[derive(Debug, Clone)]
pub struct AirReadingInput {
    pub value: f64,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Repository for air-quality database operations.
#[derive(Clone)]
pub struct AirReadingRepository {
    pool: PgPool,
}

impl AirReadingRepository {
    /// Creates a new AirReadingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single reading and return the datastore-assigned id.
    pub async fn insert_reading(&self, input: AirReadingInput) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("insert_air_reading");

        let result: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO air_quality (value, recorded_at, source)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.value)
        .bind(input.recorded_at)
        .bind(&input.source)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(result.0)
    }

    /// Get the most recent readings, newest first.
    ///
    /// Callers wanting a chart time axis reverse the result.
    pub async fn get_recent(&self, limit: i64) -> Result<Vec<AirReadingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_recent_air_readings");

        let result = sqlx::query_as::<_, AirReadingEntity>(
            r#"
            SELECT id, value, recorded_at, source
            FROM air_quality
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

    /// Get the single latest reading, if any rows exist.
    pub async fn find_latest(&self) -> Result<Option<AirReadingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_latest_air_reading");

        let result = sqlx::query_as::<_, AirReadingEntity>(
            r#"
            SELECT id, value, recorded_at, source
            FROM air_quality
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }
}
