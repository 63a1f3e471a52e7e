use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A date string that matches neither accepted shape, or matches a
    /// shape but is not a real calendar date.
    #[error("Malformed date: {0}")]
    MalformedDate(String),

    /// A storage I/O failure. A missing entry file is NOT a storage
    /// error; it reads back as empty content.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// An authentication error.
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MalformedDate(ref msg) => {
                tracing::debug!("Malformed date: {}", msg);
                (StatusCode::BAD_REQUEST, format!("Malformed date: {}", msg))
            }

            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::UNAUTHORIZED, msg.clone())
            }
        };

        let body = serde_json::to_string(&serde_json::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        (status, body).into_response()
    }
}
