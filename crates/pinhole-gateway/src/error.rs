use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::CoreError;
use pinhole_shortener::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    Gone,
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(value: ShortenerError) -> Self {
        Self::Shortener(value)
    }
}

impl From<CoreError> for AppError {
    fn from(value: CoreError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "short code not found".to_string()),
            AppError::Gone => (StatusCode::GONE, "link expired".to_string()),
            AppError::Shortener(err) => {
                let status = match err {
                    ShortenerError::InvalidUrl(_)
                    | ShortenerError::InvalidExpiration(_)
                    | ShortenerError::InvalidShortCode(_) => StatusCode::BAD_REQUEST,
                    ShortenerError::AliasConflict(_) => StatusCode::CONFLICT,
                    ShortenerError::ExhaustedRetries { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    ShortenerError::Generation(_) | ShortenerError::Storage(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let message = match status {
                    StatusCode::INTERNAL_SERVER_ERROR => "internal error".to_string(),
                    StatusCode::SERVICE_UNAVAILABLE => {
                        "could not generate code, try again".to_string()
                    }
                    _ => err.to_string(),
                };
                (status, message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
