/*
 * Responsibility
 * - GET / (疎通用, store には触れない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "Health check passed"})))
}
