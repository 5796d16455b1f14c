//! Unified error handling for the webhook backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::airtable::{LookupError, RecordStoreError};
use crate::slack::SlackError;

/// Application-level error type for webhook handlers.
///
/// Each variant maps to the HTTP outcome Slack sees: an invalid signature
/// or malformed payload is the caller's fault (400), everything else that
/// escapes a branch is a server fault (500). Ownership rejections are not
/// errors and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request signature did not verify; nothing was parsed or forwarded.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Bad request from client (missing headers, malformed payload).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Message action invoked from a channel we do not serve.
    #[error("Unexpected channel: {0}")]
    UnexpectedChannel(String),

    /// A modal callback id did not decode to a known context.
    #[error("Invalid view callback id: {0}")]
    Correlation(String),

    /// Record lookup did not produce exactly one row.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Slack Web API operation failed.
    #[error("Slack error: {0}")]
    Slack(#[from] SlackError),

    /// Record store request failed.
    #[error("Record store error: {0}")]
    Records(#[from] RecordStoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is surfaced as.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSignature(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedChannel(_)
            | Self::Correlation(_)
            | Self::Lookup(_)
            | Self::Slack(_)
            | Self::Records(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Webhook request error"
            );
        } else {
            tracing::warn!(error = %self, "Webhook request rejected");
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::InvalidSignature("signature mismatch".to_string());
        assert_eq!(err.to_string(), "Invalid signature: signature mismatch");

        let err = AppError::BadRequest("invalid payload".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid payload");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::InvalidSignature("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnexpectedChannel("C999".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Correlation("bogus".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let response = AppError::Internal("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
