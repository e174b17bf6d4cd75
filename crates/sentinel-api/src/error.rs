//! Error types for the control API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that converts
//! into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. The body
//! is always `{"error": <message>, "status": <code>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentinel_core::controller::ControllerError;
use sentinel_core::tick::TickError;

/// Errors that can occur in the control API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The operation is not permitted in this deployment.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TickError> for ApiError {
    fn from(err: TickError) -> Self {
        tracing::error!(error = %err, "Simulation step failed");
        Self::Internal(err.to_string())
    }
}

impl From<ControllerError> for ApiError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::Forbidden { environment, .. } => {
                Self::Forbidden(format!("Disabled in {environment}"))
            }
            ControllerError::Audit { .. } => {
                tracing::error!(error = %err, "Controller operation failed");
                Self::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
