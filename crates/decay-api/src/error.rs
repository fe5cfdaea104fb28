//! API error type and its HTTP mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use decay::DecayError;
use render::RenderError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::error;

/// Error body for every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Bad input; the message is returned to the caller
    #[error("{0}")]
    Validation(String),

    /// Anything else; the message is only logged
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self {
            Self::Validation(msg) => msg,
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed");
                "Internal server error".to_string()
            }
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Malformed bodies, wrong content types and unknown enum values
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// A render that panicked or was cancelled on the blocking pool
impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Failure inside one service call, before it is given its user-facing prefix
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Decay(#[from] DecayError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
