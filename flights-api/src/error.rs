use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flights_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Cancelled,
    InternalServerError(String),
}

impl AppError {
    /// Booking failures reported by the backend (seat taken, unknown seat)
    /// are the client's fault.
    pub fn from_booking(err: CoreError) -> Self {
        match err {
            CoreError::Storage(msg) => AppError::BadRequest(msg),
            other => other.into(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::BadRequest(msg),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Cancelled => AppError::Cancelled,
            CoreError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Cancelled => {
                tracing::warn!("Request cancelled before the query completed");
                (StatusCode::SERVICE_UNAVAILABLE, "request cancelled".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
