//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub fn error(status: StatusCode, code: &'static str, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }),
    )
}

pub fn unauthorized(message: impl Into<String>) -> ErrorResponse {
    error(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

pub fn internal_error(message: impl Into<String>) -> ErrorResponse {
    error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}
