use axum::{http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::infrastructure::axum_http::error_responses::error_response;

pub async fn not_found() -> impl IntoResponse {
    info!("router: not_found handler invoked");
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND")
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}
