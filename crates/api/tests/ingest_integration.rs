//! Integration tests for the telemetry ingestion endpoints.
//!
//! Run with a PostgreSQL instance available via TEST_DATABASE_URL.

mod common;

use axum::http::StatusCode;
use base64::Engine;
use chrono::{NaiveDateTime, Utc};
use tower::ServiceExt;

use common::{
    apply_schema, cleanup_all_test_data, count_rows, create_test_app, create_test_pool,
    form_request, get_request, parse_response_body, test_config, DB_LOCK, TEST_API_KEY,
};

/// 1x1 transparent PNG, valid base64.
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[tokio::test]
async fn test_ingest_air_with_epoch_timestamp() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!(
        "/api/v1/ingest/air?api_key={}&value=123.5&ts=1700000000",
        TEST_API_KEY
    );
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    let inserted_id = body["inserted_id"].as_i64().unwrap();
    assert!(inserted_id > 0);

    let row: (f64, NaiveDateTime) =
        sqlx::query_as("SELECT value, recorded_at FROM air_quality WHERE id = $1")
            .bind(inserted_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, 123.5);
    assert_eq!(
        row.1,
        chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc()
    );
}

#[tokio::test]
async fn test_ingest_air_without_timestamp_uses_now() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let before = Utc::now().naive_utc() - chrono::Duration::seconds(5);
    let uri = format!("/api/v1/ingest/air?api_key={}&value=42", TEST_API_KEY);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    let after = Utc::now().naive_utc() + chrono::Duration::seconds(5);

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let inserted_id = body["inserted_id"].as_i64().unwrap();

    let row: (NaiveDateTime,) =
        sqlx::query_as("SELECT recorded_at FROM air_quality WHERE id = $1")
            .bind(inserted_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(row.0 >= before && row.0 <= after);
}

#[tokio::test]
async fn test_ingest_air_missing_value_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!("/api/v1/ingest/air?api_key={}", TEST_API_KEY);
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing or invalid value parameter");
    assert_eq!(count_rows(&pool, "air_quality").await, 0);
}

#[tokio::test]
async fn test_ingest_air_non_numeric_value_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!("/api/v1/ingest/air?api_key={}&value=abc", TEST_API_KEY);
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Missing or invalid value parameter");
    assert_eq!(count_rows(&pool, "air_quality").await, 0);
}

#[tokio::test]
async fn test_ingest_air_bad_api_key_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request("/api/v1/ingest/air?api_key=wrong&value=42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid API key");
    assert_eq!(count_rows(&pool, "air_quality").await, 0);
}

#[tokio::test]
async fn test_ingest_air_missing_api_key_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request("/api/v1/ingest/air?value=42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(count_rows(&pool, "air_quality").await, 0);
}

#[tokio::test]
async fn test_ingest_flame_bad_api_key_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(get_request("/api/v1/ingest/flame?api_key=wrong&status=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid API key");
    assert_eq!(count_rows(&pool, "flame_events").await, 0);
}

#[tokio::test]
async fn test_ingest_image_missing_api_key_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!("/api/v1/ingest/image?value={}", TINY_PNG_BASE64);
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Invalid API key");
    assert_eq!(count_rows(&pool, "cow_detections").await, 0);
}

#[tokio::test]
async fn test_ingest_flame_accepts_status_literals() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;

    for (literal, expected) in [("0", 0i16), ("1", 1i16), ("00", 0i16), ("01", 1i16)] {
        let app = create_test_app(test_config(), pool.clone());
        let uri = format!(
            "/api/v1/ingest/flame?api_key={}&status={}",
            TEST_API_KEY, literal
        );
        let response = app.oneshot(get_request(&uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "literal {:?}", literal);
        let body = parse_response_body(response).await;
        let inserted_id = body["inserted_id"].as_i64().unwrap();

        let row: (i16,) = sqlx::query_as("SELECT status FROM flame_events WHERE id = $1")
            .bind(inserted_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, expected, "literal {:?}", literal);
    }
}

#[tokio::test]
async fn test_ingest_flame_rejects_other_literals() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;

    for literal in ["2", "on", "true", "", "10"] {
        let app = create_test_app(test_config(), pool.clone());
        let uri = format!(
            "/api/v1/ingest/flame?api_key={}&status={}",
            TEST_API_KEY, literal
        );
        let response = app.oneshot(get_request(&uri)).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "literal {:?}",
            literal
        );
        let body = parse_response_body(response).await;
        assert_eq!(
            body["message"],
            "Missing or invalid status parameter (use 1 or 0)"
        );
    }

    assert_eq!(count_rows(&pool, "flame_events").await, 0);
}

#[tokio::test]
async fn test_ingest_image_get_stores_file_and_row() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let config = test_config();
    let upload_dir = config.storage.upload_dir.clone();
    let app = create_test_app(config, pool.clone());

    // The payload avoids '+' and '/', so it is query-safe as-is
    let uri = format!(
        "/api/v1/ingest/image?api_key={}&value={}",
        TEST_API_KEY, TINY_PNG_BASE64
    );
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Image stored successfully");
    let file = body["file"].as_str().unwrap();
    assert!(file.starts_with("cow_") && file.ends_with(".jpg"));

    // File on disk decodes back to the uploaded bytes
    let stored = std::fs::read(std::path::Path::new(&upload_dir).join(file)).unwrap();
    let original = base64::engine::general_purpose::STANDARD
        .decode(TINY_PNG_BASE64)
        .unwrap();
    assert_eq!(stored, original);

    // Row keeps the original base64 payload and a relative path
    let inserted_id = body["inserted_id"].as_i64().unwrap();
    let row: (String, String) =
        sqlx::query_as("SELECT value, image_path FROM cow_detections WHERE id = $1")
            .bind(inserted_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, TINY_PNG_BASE64);
    assert!(row.1.ends_with(file));
}

#[tokio::test]
async fn test_ingest_image_post_form() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let body = format!("api_key={}&value={}", TEST_API_KEY, TINY_PNG_BASE64);
    let response = app
        .oneshot(form_request("/api/v1/ingest/image", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(count_rows(&pool, "cow_detections").await, 1);
}

#[tokio::test]
async fn test_ingest_image_invalid_base64_leaves_no_row() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!(
        "/api/v1/ingest/image?api_key={}&value=%25%25not-base64%25%25",
        TEST_API_KEY
    );
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid base64 image data");
    assert_eq!(count_rows(&pool, "cow_detections").await, 0);
}

#[tokio::test]
async fn test_ingest_image_missing_value_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    apply_schema(&pool).await;
    cleanup_all_test_data(&pool).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!("/api/v1/ingest/image?api_key={}", TEST_API_KEY);
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Missing value parameter (base64 image)");
    assert_eq!(count_rows(&pool, "cow_detections").await, 0);
}
