//! Slack interaction webhook handler.
//!
//! One endpoint receives every interactive callback: moderation button
//! clicks, the reply/react message shortcuts, modal submissions, and the
//! emoji autocomplete queries of the react modal. The payload's `type`
//! field picks the branch; each branch produces exactly one response.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, info, instrument, warn};

use crate::airtable::{by_published_ts, by_published_ts_or, find_single};
use crate::correlation::ModalContext;
use crate::emoji;
use crate::error::AppError;
use crate::services::moderation;
use crate::slack::{
    BlockActionsPayload, BlockSuggestionPayload, InteractionPayload, MessageActionPayload,
    OptionsResponse, ViewSubmissionPayload, ViewUpdateResponse, react_modal, reply_modal,
    with_rejection,
};
use crate::state::AppState;

/// Shortcut callback id for replying anonymously to a confession.
const REPLY_CALLBACK: &str = "reply_anonymous";
/// Shortcut callback id for reacting anonymously to a confession.
const REACT_CALLBACK: &str = "react_anonymous";

const REPLY_REJECTION: &str =
    "You are not the original poster of the confession, so you cannot reply anonymously.";
const REACT_REJECTION: &str =
    "You are not the original poster of the confession, so you cannot react anonymously.";
const REPLY_SUBMIT_REJECTION: &str = "Failed to reply: *You are not the original poster of the \
                                      confession, so you cannot reply anonymously.*";
const REACT_SUBMIT_REJECTION: &str = "Failed to react: *You are not the original poster of the \
                                      confession, so you cannot react anonymously.*";

/// Create the interaction webhook route.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/slack/interactions", post(handle_interaction))
}

/// Handle a Slack interaction webhook.
///
/// Verifies the signature, parses the form-encoded payload, and dispatches
/// on its type. The request is never left unanswered: branches that produce
/// no body fall through to an empty 204.
#[instrument(skip(state, headers, body))]
async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, AppError> {
    super::verify_slack_request(&state, &headers, &body)?;

    let payload = parse_payload(&body)?;

    match payload {
        InteractionPayload::BlockActions(p) => Ok(handle_block_actions(&state, &p).await),
        InteractionPayload::BlockSuggestion(p) => handle_block_suggestion(&state, &p).await,
        InteractionPayload::MessageAction(p) => Ok(handle_message_action(&state, &p).await),
        InteractionPayload::ViewSubmission(p) => Ok(handle_view_submission(&state, &p).await),
    }
}

/// Decode the form-encoded `payload` field into a typed interaction.
fn parse_payload(body: &str) -> Result<InteractionPayload, AppError> {
    let payload = body
        .strip_prefix("payload=")
        .ok_or_else(|| AppError::BadRequest("Missing payload field".into()))?;

    // Form encoding sends spaces as '+'; literal plus signs arrive as %2B
    let unplussed = payload.replace('+', " ");
    let decoded = urlencoding::decode(&unplussed)
        .map_err(|e| AppError::BadRequest(format!("Failed to decode payload: {e}")))?;

    serde_json::from_str(&decoded)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse payload: {e}")))
}

/// Map a moderation button value to a verdict. `None` means the value is
/// not a moderation action and must be ignored.
fn moderation_verdict(value: Option<&str>) -> Option<bool> {
    match value {
        Some("approve") => Some(true),
        Some("disapprove") => Some(false),
        _ => None,
    }
}

/// Notify the interaction's `response_url` of a failure (best effort),
/// then turn the error into the response.
async fn fail_branch(state: &AppState, response_url: Option<&str>, error: AppError) -> Response {
    if let Some(url) = response_url {
        let notice = format!(":x: Something went wrong: {error}");
        if let Err(notify_err) = state.chat().respond(url, &notice).await {
            warn!(error = %notify_err, "Failed to deliver failure notice to response_url");
        }
    }
    error.into_response()
}

// =============================================================================
// Block actions (moderation buttons)
// =============================================================================

async fn handle_block_actions(state: &AppState, payload: &BlockActionsPayload) -> Response {
    // Slack can batch actions, but these messages carry one button per
    // verdict; anything past the first entry is ignored on purpose
    let Some(action) = payload.actions.first() else {
        debug!("Block actions payload carried no actions");
        return StatusCode::NO_CONTENT.into_response();
    };

    let Some(approved) = moderation_verdict(action.value.as_deref()) else {
        debug!(value = ?action.value, "Ignoring unrecognized action value");
        return StatusCode::NO_CONTENT.into_response();
    };

    info!(ts = %payload.message.ts, approved, "Moderation verdict received");
    match moderation::review_confession(state, &payload.message.ts, approved).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => fail_branch(state, Some(payload.response_url.as_str()), e).await,
    }
}

// =============================================================================
// Block suggestion (emoji autocomplete)
// =============================================================================

async fn handle_block_suggestion(
    state: &AppState,
    payload: &BlockSuggestionPayload,
) -> Result<Response, AppError> {
    // No fallback: if the custom emoji listing fails, so does the request
    let custom = state.chat().emoji_list().await?;
    let options = emoji::candidates(&payload.value, &custom);

    debug!(query = %payload.value, count = options.len(), "Emoji options built");
    Ok(Json(OptionsResponse::from_tokens(options)).into_response())
}

// =============================================================================
// Message actions (reply/react shortcuts)
// =============================================================================

async fn handle_message_action(state: &AppState, payload: &MessageActionPayload) -> Response {
    match message_action(state, payload).await {
        Ok(response) => response,
        Err(e) => fail_branch(state, Some(payload.response_url.as_str()), e).await,
    }
}

async fn message_action(
    state: &AppState,
    payload: &MessageActionPayload,
) -> Result<Response, AppError> {
    if payload.channel.id != state.config().confessions_channel {
        return Err(AppError::UnexpectedChannel(payload.channel.id.clone()));
    }

    match payload.callback_id.as_str() {
        REPLY_CALLBACK => open_reply_modal(state, payload).await,
        REACT_CALLBACK => open_react_modal(state, payload).await,
        other => {
            debug!(callback_id = other, "Unknown message action callback");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

async fn open_reply_modal(
    state: &AppState,
    payload: &MessageActionPayload,
) -> Result<Response, AppError> {
    let record = find_single(state.records(), &by_published_ts(&payload.message.ts)).await?;
    let published_ts = record
        .published_ts
        .clone()
        .ok_or_else(|| AppError::Internal("Matched record missing published_ts".into()))?;

    if !record.is_submitter(&payload.user.id) {
        info!(confession = record.id, "Reply refused: not the original submitter");
        state
            .chat()
            .respond(&payload.response_url, REPLY_REJECTION)
            .await?;
        return Ok(StatusCode::OK.into_response());
    }

    state
        .chat()
        .open_view(&payload.trigger_id, reply_modal(record.id, &published_ts))
        .await?;

    info!(confession = record.id, "Reply modal opened");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn open_react_modal(
    state: &AppState,
    payload: &MessageActionPayload,
) -> Result<Response, AppError> {
    // The shortcut may be invoked on a threaded reply; the confession then
    // matches the thread root rather than the clicked message
    let formula = by_published_ts_or(&payload.message.ts, payload.message.thread_ts.as_deref());
    let record = find_single(state.records(), &formula).await?;
    let published_ts = record
        .published_ts
        .clone()
        .ok_or_else(|| AppError::Internal("Matched record missing published_ts".into()))?;

    if !record.is_submitter(&payload.user.id) {
        info!(confession = record.id, "Reaction refused: not the original submitter");
        state
            .chat()
            .respond(&payload.response_url, REACT_REJECTION)
            .await?;
        return Ok(StatusCode::OK.into_response());
    }

    state
        .chat()
        .open_view(
            &payload.trigger_id,
            react_modal(record.id, &published_ts, &payload.message.ts),
        )
        .await?;

    info!(confession = record.id, "React modal opened");
    Ok(StatusCode::NO_CONTENT.into_response())
}

// =============================================================================
// View submissions (modal forms)
// =============================================================================

async fn handle_view_submission(state: &AppState, payload: &ViewSubmissionPayload) -> Response {
    match view_submission(state, payload).await {
        Ok(response) => response,
        // A view submission has no response_url; the failure stays generic
        Err(e) => e.into_response(),
    }
}

async fn view_submission(
    state: &AppState,
    payload: &ViewSubmissionPayload,
) -> Result<Response, AppError> {
    let context = ModalContext::parse(&payload.view.callback_id)
        .ok_or_else(|| AppError::Correlation(payload.view.callback_id.clone()))?;

    match context {
        ModalContext::Reply { published_ts } => submit_reply(state, payload, &published_ts).await,
        ModalContext::React {
            published_ts,
            thread_ts,
        } => submit_reaction(state, payload, &published_ts, &thread_ts).await,
    }
}

async fn submit_reply(
    state: &AppState,
    payload: &ViewSubmissionPayload,
    published_ts: &str,
) -> Result<Response, AppError> {
    let record = find_single(state.records(), &by_published_ts(published_ts)).await?;

    if !record.is_submitter(&payload.user.id) {
        info!(
            confession = record.id,
            "Reply refused at submission: not the original submitter"
        );
        let view = with_rejection(reply_modal(record.id, published_ts), REPLY_SUBMIT_REJECTION);
        return Ok(Json(ViewUpdateResponse::update(view)).into_response());
    }

    let text = payload
        .view
        .state
        .reply_text()
        .ok_or_else(|| AppError::Internal("View submission missing reply input".into()))?;

    let ts = state
        .chat()
        .post_message(
            &state.config().confessions_channel,
            text,
            Some(published_ts),
        )
        .await?;

    info!(confession = record.id, ts = %ts, "Anonymous reply posted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn submit_reaction(
    state: &AppState,
    payload: &ViewSubmissionPayload,
    published_ts: &str,
    thread_ts: &str,
) -> Result<Response, AppError> {
    let record = find_single(state.records(), &by_published_ts(published_ts)).await?;

    if !record.is_submitter(&payload.user.id) {
        info!(
            confession = record.id,
            "Reaction refused at submission: not the original submitter"
        );
        let view = with_rejection(
            react_modal(record.id, published_ts, thread_ts),
            REACT_SUBMIT_REJECTION,
        );
        return Ok(Json(ViewUpdateResponse::update(view)).into_response());
    }

    let token = payload
        .view
        .state
        .selected_emoji()
        .ok_or_else(|| AppError::Internal("View submission missing emoji selection".into()))?;
    let name = token.replace(':', "");

    state
        .chat()
        .add_reaction(&state.config().confessions_channel, thread_ts, &name)
        .await?;

    info!(confession = record.id, emoji = %name, "Anonymous reaction added");
    Ok(StatusCode::NO_CONTENT.into_response())
}
