use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::metrics::{QUIZ_REJECTIONS, UPSTREAM_ERRORS, VALIDATION_ERRORS};
use crate::models::MessageResponse;

/// Startup configuration problems. Any of these stops the process before it binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set; pass --gemini-api-key or export GEMINI_API_KEY")]
    MissingApiKey,

    #[error("invalid CORS origin: {0:?}")]
    InvalidOrigin(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(&'static str),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures talking to the generative language API.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to generation API timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("generation API rejected the credentials")]
    Unauthorized,

    #[error("generation API quota or rate limit exceeded")]
    RateLimited,

    #[error("generation API returned {status}")]
    Upstream { status: u16, body: String },

    #[error("generation blocked by safety filters: {0}")]
    Blocked(String),

    #[error("generation API returned no text")]
    EmptyResponse,

    #[error("failed to parse generation API response: {0}")]
    MalformedResponse(String),

    #[error("model output does not match the quiz format: {0}")]
    MalformedQuiz(String),
}

impl GenerationError {
    // worth one more attempt
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Timeout | GenerationError::Network(_) | GenerationError::RateLimited => {
                true
            }
            GenerationError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_transient() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("External service error: {0}")]
    ExternalService(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(msg) => {
                VALIDATION_ERRORS.inc();
                tracing::debug!(reason = %msg, "Rejected request");
                (StatusCode::BAD_REQUEST, "Validation error".to_string(), Some(msg))
            }
            // login replies always use the {"message": ...} shape
            AppError::Unauthorized(message) => {
                return (StatusCode::UNAUTHORIZED, Json(MessageResponse { message }))
                    .into_response();
            }
            AppError::ExternalService(err) => {
                if matches!(err, GenerationError::MalformedQuiz(_)) {
                    QUIZ_REJECTIONS.inc();
                } else {
                    UPSTREAM_ERRORS.inc();
                }
                // upstream bodies can echo request data, keep them in the logs only
                tracing::error!(error = ?err, "Generation API call failed");
                let details = match &err {
                    GenerationError::Upstream { status, .. } => {
                        Some(format!("generation API returned {}", status))
                    }
                    other => Some(other.to_string()),
                };
                (
                    err.status_code(),
                    "External service error".to_string(),
                    details,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
