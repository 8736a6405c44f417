//! HTTP error envelope.
//!
//! Every failure leaves the server as `{ "success": false, "message": ... }`.
//! 500 replies add an `error` field whose content depends on [`RunMode`]:
//! the internal detail in development, a placeholder otherwise.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};
use wire::{ApiResponse, FailureReason, MSG_LOGIN_FAILED_INTERNAL, MSG_ROUTE_NOT_FOUND, MSG_UNHANDLED_INTERNAL};

use crate::config::RunMode;
use crate::services::credentials::CredentialStoreError;

const LOGIN_FAILED_PLACEHOLDER: &str = "Error interno";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The credential check refused the submission.
    #[error("{0}")]
    Rejected(FailureReason),
    /// The credential check itself failed.
    #[error("credential check failed: {0}")]
    LoginFailed(String),
    /// Anything that escaped a handler: panics, unreadable bodies.
    #[error("unhandled error: {0}")]
    Unhandled(String),
    #[error("route not found")]
    NotFound,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(FailureReason::MissingFields) => StatusCode::BAD_REQUEST,
            Self::Rejected(FailureReason::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::LoginFailed(_) | Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Render the JSON body for this error.
    #[must_use]
    pub fn envelope(&self, mode: RunMode) -> ApiResponse {
        match self {
            Self::Rejected(reason) => ApiResponse::failure(reason.to_string()),
            Self::LoginFailed(detail) => {
                let error = if mode.is_development() {
                    Value::String(detail.clone())
                } else {
                    Value::String(LOGIN_FAILED_PLACEHOLDER.to_owned())
                };
                ApiResponse::failure(MSG_LOGIN_FAILED_INTERNAL).with_error(error)
            }
            Self::Unhandled(detail) => {
                let error = if mode.is_development() { Value::String(detail.clone()) } else { json!({}) };
                ApiResponse::failure(MSG_UNHANDLED_INTERNAL).with_error(error)
            }
            Self::NotFound => ApiResponse::failure(MSG_ROUTE_NOT_FOUND),
        }
    }

    #[must_use]
    pub fn in_mode(self, mode: RunMode) -> ApiFailure {
        ApiFailure { error: self, mode }
    }
}

impl From<CredentialStoreError> for ApiError {
    fn from(err: CredentialStoreError) -> Self {
        Self::LoginFailed(err.to_string())
    }
}

/// Text carried by a panic payload, if it is a string.
#[must_use]
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic".to_owned()
    }
}

/// An [`ApiError`] bound to the mode it will be rendered in.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: ApiError,
    pub mode: RunMode,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if self.error.status().is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }
        (self.error.status(), Json(self.error.envelope(self.mode))).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
