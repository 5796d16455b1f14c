//! HTTP route handlers for the webhook backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check (wired in main)
//!
//! # Slack webhooks
//! POST /api/slack/interactions  - Interactive callbacks (buttons, shortcuts,
//!                                 modal submissions, emoji autocomplete)
//! POST /api/slack/commands      - Slash commands, forwarded to the worker
//! ```
//!
//! Both webhook routes verify the Slack signature over the raw body before
//! anything else happens to the request.

use axum::Router;
use axum::http::HeaderMap;
use tracing::debug;

use crate::error::AppError;
use crate::slack;
use crate::state::AppState;

pub mod commands;
pub mod interactions;

/// Create the webhook routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(interactions::router())
        .merge(commands::router())
}

/// Verify the Slack signature headers against the raw request body.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if either header is missing and
/// `AppError::InvalidSignature` if verification fails. Nothing may parse
/// the body before this succeeds.
pub(crate) fn verify_slack_request(
    state: &AppState,
    headers: &HeaderMap,
    body: &str,
) -> Result<(), AppError> {
    let timestamp = headers
        .get("X-Slack-Request-Timestamp")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing timestamp header".into()))?;

    let signature = headers
        .get("X-Slack-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing signature header".into()))?;

    slack::verify_signature(
        &state.config().slack.signing_secret,
        timestamp,
        body,
        signature,
    )
    .map_err(|e| AppError::InvalidSignature(e.to_string()))?;

    debug!("Slack signature verified");
    Ok(())
}
