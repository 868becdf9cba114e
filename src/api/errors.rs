use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::errors::{RateLimitExceeded, ValidationError};

use super::models::ErrorResponse;

pub const RATE_LIMIT_MESSAGE: &str = "Slow down queen 👑 Too many requests";

/// Rejections surfaced to the client before the pipeline runs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    RateLimited(#[from] RateLimitExceeded),

    #[error("Request body larger than {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::RateLimited(_) => {
                (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE.to_string())
            }
            e @ ApiError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
