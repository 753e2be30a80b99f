/*
 * Responsibility
 * - GET /health (疎通用, 認証なし)
 * - correlation middleware は通るので X-Correlation-Id は返る
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
