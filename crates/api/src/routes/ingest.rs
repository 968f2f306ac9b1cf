//! Telemetry ingestion endpoint handlers.
//!
//! Every handler follows the same shape: check the shared secret, validate
//! the required parameter, normalize the timestamp, write exactly one row,
//! return the JSON acknowledgement.

use axum::{
    extract::{Query, State},
    Form, Json,
};
use base64::Engine;
use persistence::repositories::{
    AirReadingInput, AirReadingRepository, FlameEventInput, FlameEventRepository,
    ImageDetectionInput, ImageDetectionRepository,
};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_row_ingested;
use domain::models::air_reading::IngestAirParams;
use domain::models::envelope::IngestAck;
use domain::models::flame_event::{FlameStatus, IngestFlameParams};
use domain::models::image_detection::{ImageIngestAck, IngestImageParams};

/// Validates the caller-supplied token against the configured shared secret.
fn require_api_key(state: &AppState, provided: Option<&str>) -> Result<(), ApiError> {
    if shared::secret::verify_api_key(&state.config.auth.api_key, provided) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Invalid API key".to_string()))
    }
}

/// Ingest a single air-quality reading.
///
/// GET /api/v1/ingest/air?api_key=..&value=..[&source=..][&ts=..]
pub async fn ingest_air(
    State(state): State<AppState>,
    Query(params): Query<IngestAirParams>,
) -> Result<Json<IngestAck>, ApiError> {
    require_api_key(&state, params.api_key.as_deref())?;

    let value = params.parsed_value().ok_or_else(|| {
        ApiError::Validation("Missing or invalid value parameter".to_string())
    })?;

    let recorded_at = shared::timestamp::normalize(params.ts.as_deref());

    let repo = AirReadingRepository::new(state.pool.clone());
    let inserted_id = repo
        .insert_reading(AirReadingInput {
            value,
            recorded_at,
            source: params.source.clone(),
        })
        .await?;

    record_row_ingested("air");
    info!(
        inserted_id,
        value,
        source = params.source.as_deref().unwrap_or("-"),
        "Air reading ingested"
    );

    Ok(Json(IngestAck::new(inserted_id)))
}

/// Ingest a single flame-detection event.
///
/// GET /api/v1/ingest/flame?api_key=..&status=..[&source=..][&ts=..]
pub async fn ingest_flame(
    State(state): State<AppState>,
    Query(params): Query<IngestFlameParams>,
) -> Result<Json<IngestAck>, ApiError> {
    require_api_key(&state, params.api_key.as_deref())?;

    let status = params
        .status
        .as_deref()
        .and_then(FlameStatus::parse)
        .ok_or_else(|| {
            ApiError::Validation("Missing or invalid status parameter (use 1 or 0)".to_string())
        })?;

    let recorded_at = shared::timestamp::normalize(params.ts.as_deref());

    let repo = FlameEventRepository::new(state.pool.clone());
    let inserted_id = repo
        .insert_event(FlameEventInput {
            status: status.as_i16(),
            recorded_at,
            source: params.source.clone(),
        })
        .await?;

    record_row_ingested("flame");
    info!(
        inserted_id,
        status = status.as_i16(),
        source = params.source.as_deref().unwrap_or("-"),
        "Flame event ingested"
    );

    Ok(Json(IngestAck::new(inserted_id)))
}

/// Ingest a camera snapshot from query parameters.
///
/// GET /api/v1/ingest/image?api_key=..&value=<base64>[&source=..][&ts=..]
pub async fn ingest_image(
    State(state): State<AppState>,
    Query(params): Query<IngestImageParams>,
) -> Result<Json<ImageIngestAck>, ApiError> {
    store_image(state, params).await
}

/// Ingest a camera snapshot from an urlencoded form body.
///
/// POST /api/v1/ingest/image
pub async fn ingest_image_form(
    State(state): State<AppState>,
    Form(params): Form<IngestImageParams>,
) -> Result<Json<ImageIngestAck>, ApiError> {
    store_image(state, params).await
}

/// Shared image ingestion path for both transports.
///
/// Two persistence steps: file write, then row insert. If the insert fails
/// the just-written file is deleted so no orphan remains.
async fn store_image(
    state: AppState,
    params: IngestImageParams,
) -> Result<Json<ImageIngestAck>, ApiError> {
    require_api_key(&state, params.api_key.as_deref())?;

    let encoded = match params.value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => {
            return Err(ApiError::Validation(
                "Missing value parameter (base64 image)".to_string(),
            ))
        }
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| ApiError::Validation("Invalid base64 image data".to_string()))?;

    let recorded_at = shared::timestamp::normalize(params.ts.as_deref());

    let stored = state
        .image_store
        .save(&bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store image file: {}", e)))?;

    let repo = ImageDetectionRepository::new(state.pool.clone());
    let inserted = repo
        .insert_detection(ImageDetectionInput {
            value: encoded.to_string(),
            image_path: stored.image_path.clone(),
            recorded_at,
            source: params.source.clone(),
        })
        .await;

    let inserted_id = match inserted {
        Ok(id) => id,
        Err(e) => {
            // Roll back the file write so row and file stay paired
            state.image_store.remove(&stored.filename).await;
            return Err(e.into());
        }
    };

    record_row_ingested("image");
    info!(
        inserted_id,
        file = %stored.filename,
        bytes = bytes.len(),
        source = params.source.as_deref().unwrap_or("-"),
        "Image stored"
    );

    Ok(Json(ImageIngestAck::new(stored.filename, inserted_id)))
}
