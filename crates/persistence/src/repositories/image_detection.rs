//! Image-detection repository for database operations.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::metrics::QueryTimer;

/// Input data for inserting an image-detection record.
#[derive(Debug, Clone)]
pub struct ImageDetectionInput {
    /// Original base64 payload as submitted by the device.
    pub value: String,
    /// Location of the decoded file: the upload directory joined with the
    /// generated file name.
    pub image_path: String,
    pub recorded_at: NaiveDateTime,
    pub source: Option<String>,
}

/// Repository for image-detection database operations.
#[derive(Clone)]
pub struct ImageDetectionRepository {
    pool: PgPool,
}

impl ImageDetectionRepository {
    /// Creates a new ImageDetectionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single detection and return the datastore-assigned id.
    pub async fn insert_detection(&self, input: ImageDetectionInput) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("insert_image_detection");

        let result: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO cow_detections (value, image_path, recorded_at, source)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.value)
        .bind(&input.image_path)
        .bind(input.recorded_at)
        .bind(&input.source)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(result.0)
    }
}
