//! Slash command webhook handler.
//!
//! Confession submission runs in the worker, which can take longer than
//! Slack's three-second acknowledgment deadline. This endpoint verifies
//! the request signature, hands the raw body to the worker, and always
//! acknowledges once the signature check passes; the worker's outcome is
//! reported to the user through the command's `response_url`, not here.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use tracing::{debug, instrument, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Create the slash command route.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/slack/commands", post(handle_command))
}

/// Handle a slash command webhook.
///
/// Invalid signatures are rejected with 400 and nothing is forwarded.
/// A failed forward is logged but still acknowledged with 200.
#[instrument(skip(state, headers, body))]
async fn handle_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<StatusCode, AppError> {
    super::verify_slack_request(&state, &headers, &body)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    debug!("Forwarding command to worker");
    if let Err(e) = state.forwarder().forward(content_type, body).await {
        warn!(error = %e, "Worker forward failed");
    }

    Ok(StatusCode::OK)
}
