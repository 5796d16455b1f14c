//! Confession moderation.
//!
//! Submitted confessions are staged into a moderation channel with
//! approve/disapprove buttons; the block-actions branch lands here when a
//! moderator clicks one. Approval publishes the confession text to the
//! confessions channel. The record itself is never written from this
//! service - publication bookkeeping belongs to the submission worker.

use tracing::{info, instrument};

use crate::airtable::{by_staging_ts, find_single};
use crate::error::AppError;
use crate::state::AppState;

/// Apply a moderator's verdict to the confession staged at `staging_ts`.
///
/// # Errors
///
/// Returns error if the staged confession cannot be resolved to exactly
/// one record or the publish call fails.
#[instrument(skip(state))]
pub async fn review_confession(
    state: &AppState,
    staging_ts: &str,
    approved: bool,
) -> Result<(), AppError> {
    let record = find_single(state.records(), &by_staging_ts(staging_ts)).await?;

    if approved {
        let text = format!("*{}:* {}", record.id, record.text);
        let ts = state
            .chat()
            .post_message(&state.config().confessions_channel, &text, None)
            .await?;
        info!(confession = record.id, ts = %ts, "Confession published");
    } else {
        info!(confession = record.id, "Confession rejected by moderator");
    }

    Ok(())
}
