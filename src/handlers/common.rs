//! Common handlers (health, fallback)

use axum::{http::StatusCode, response::Json};

use crate::server::ApiResponse;

pub async fn health_handler() -> Json<ApiResponse<String>> {
    Json(ApiResponse::success("OK".to_string()))
}

pub async fn not_found_handler() -> (StatusCode, Json<ApiResponse<String>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Not found".to_string())),
    )
}
