use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    ErrorResponse {
        error: message.into(),
    }
    .into_response_with(status)
}
