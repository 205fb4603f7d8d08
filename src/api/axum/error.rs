use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::GuardError;
use crate::api::ErrorResponse;

/// converts `GuardError` into appropriate HTTP responses
#[derive(Debug)]
pub struct AppError(pub GuardError);

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        Self(err)
    }
}

impl AppError {
    /// Status code for this error, shared with handlers that render HTML
    /// bodies instead of JSON.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GuardError::CsrfInvalid | GuardError::CaptchaInvalid => StatusCode::FORBIDDEN,
            GuardError::MissingField => StatusCode::BAD_REQUEST,
            GuardError::PathRejected => StatusCode::NOT_FOUND,
            GuardError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
