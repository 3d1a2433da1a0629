use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::application::usecases::errors::UseCaseError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
    pub code: u16,
    pub message: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message: message.into(),
    });
    (status, body).into_response()
}

pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    let body = Json(SuccessResponse {
        data,
        code: status.as_u16(),
        message: message.to_string(),
    });
    (status, body).into_response()
}

/// Unwraps a JSON body, answering malformed input with the error envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
}

impl IntoResponse for UseCaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_opaque() {
            // Detail stays in the logs.
            error!(status = %status, error = ?self, "http: request failed");
            match self {
                UseCaseError::Upstream(_) => "payment gateway unavailable".to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        error_response(status, message)
    }
}
