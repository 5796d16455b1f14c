//! Slack payload and Block Kit types.
//!
//! The inbound side is [`InteractionPayload`], a closed union over the
//! `type` field of interactive webhook payloads; deserialization fails for
//! unknown types, so nothing falls through a dispatch silently.
//!
//! The outbound side is the subset of the Block Kit specification needed
//! for the reply/react modals and the emoji autocomplete options.
//!
//! See: <https://api.slack.com/block-kit>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound: interaction payloads
// =============================================================================

/// Interactive webhook payload, discriminated by its `type` field.
///
/// Variants cover the four interactions this backend serves. Any other
/// `type` is a deserialization error, surfaced to Slack as a 400.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionPayload {
    /// Button click on a posted message (moderation approve/disapprove).
    BlockActions(BlockActionsPayload),
    /// Autocomplete query for an `external_select` element.
    BlockSuggestion(BlockSuggestionPayload),
    /// Message shortcut invoked from a message's context menu.
    MessageAction(MessageActionPayload),
    /// Modal form submitted.
    ViewSubmission(ViewSubmissionPayload),
}

/// A `block_actions` payload (moderation button click).
#[derive(Debug, Deserialize)]
pub struct BlockActionsPayload {
    /// URL for posting a follow-up to the invoking user.
    pub response_url: String,
    /// The message the buttons are attached to.
    pub message: MessageRef,
    /// Actions that were triggered. Only the first entry is acted on.
    #[serde(default)]
    pub actions: Vec<ActionRef>,
}

/// A `block_suggestion` payload (emoji autocomplete query).
#[derive(Debug, Deserialize)]
pub struct BlockSuggestionPayload {
    /// Partial text the user has typed so far.
    pub value: String,
}

/// A `message_action` payload (shortcut from a message's context menu).
#[derive(Debug, Deserialize)]
pub struct MessageActionPayload {
    /// Shortcut identifier configured in the app manifest.
    pub callback_id: String,
    /// Trigger id required to open a modal.
    pub trigger_id: String,
    /// URL for posting a follow-up to the invoking user.
    pub response_url: String,
    /// User who invoked the shortcut.
    pub user: UserRef,
    /// The message the shortcut was invoked on.
    pub message: MessageRef,
    /// Channel the message lives in.
    pub channel: ChannelRef,
}

/// A `view_submission` payload (modal form submitted).
#[derive(Debug, Deserialize)]
pub struct ViewSubmissionPayload {
    /// User who submitted the modal.
    pub user: UserRef,
    /// The submitted view.
    pub view: ViewPayload,
}

/// User reference from an interaction payload.
#[derive(Debug, Deserialize)]
pub struct UserRef {
    /// Slack user ID.
    pub id: String,
}

/// Channel reference from an interaction payload.
#[derive(Debug, Deserialize)]
pub struct ChannelRef {
    /// Channel ID.
    pub id: String,
}

/// Message reference from an interaction payload.
#[derive(Debug, Deserialize)]
pub struct MessageRef {
    /// Message timestamp (unique within its channel).
    pub ts: String,
    /// Thread root timestamp, present when the message is a threaded reply.
    #[serde(default)]
    pub thread_ts: Option<String>,
}

/// A single action from a `block_actions` payload.
#[derive(Debug, Deserialize)]
pub struct ActionRef {
    /// Action ID (set when creating the button).
    pub action_id: String,
    /// Value attached to the action.
    #[serde(default)]
    pub value: Option<String>,
}

/// The view part of a `view_submission` payload.
#[derive(Debug, Deserialize)]
pub struct ViewPayload {
    /// Callback id carrying the encoded modal context.
    pub callback_id: String,
    /// Submitted input state.
    pub state: ViewState,
}

/// Submitted input state: block id -> action id -> value.
#[derive(Debug, Deserialize)]
pub struct ViewState {
    pub values: HashMap<String, HashMap<String, InputValue>>,
}

impl ViewState {
    /// The multiline reply text, if the view carried the reply input.
    #[must_use]
    pub fn reply_text(&self) -> Option<&str> {
        match self.values.get("reply")?.get("confession_reply")? {
            InputValue::PlainTextInput { value } => value.as_deref(),
            InputValue::ExternalSelect { .. } => None,
        }
    }

    /// The selected emoji token, if the view carried the emoji picker.
    #[must_use]
    pub fn selected_emoji(&self) -> Option<&str> {
        match self.values.get("emoji")?.get("emoji")? {
            InputValue::ExternalSelect { selected_option } => {
                selected_option.as_ref().map(|o| o.value.as_str())
            }
            InputValue::PlainTextInput { .. } => None,
        }
    }
}

/// A submitted input element value.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputValue {
    /// Free-form text input.
    PlainTextInput {
        #[serde(default)]
        value: Option<String>,
    },
    /// Remote-options select.
    ExternalSelect {
        #[serde(default)]
        selected_option: Option<SelectedOption>,
    },
}

/// A selected option from a select element.
#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

// =============================================================================
// Outbound: Block Kit subset
// =============================================================================

/// Block Kit block types used in the modals.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Section block with text and optional accessory.
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<SelectAccessory>,
    },
    /// Input block wrapping a form element.
    Input {
        block_id: String,
        label: PlainText,
        element: InputElement,
    },
    /// Divider block (horizontal line).
    Divider,
}

/// Text object types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    /// Plain text (no formatting).
    PlainText { text: String, emoji: bool },
    /// Markdown text (supports formatting).
    Mrkdwn { text: String },
}

impl Text {
    /// Create a plain text object.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    /// Create a markdown text object.
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// Plain text object (for titles, labels, and buttons).
#[derive(Debug, Clone, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    /// Create a new plain text object.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Select accessory for section blocks.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectAccessory {
    /// Remote-options select, backed by the block suggestion endpoint.
    ExternalSelect {
        placeholder: PlainText,
        action_id: String,
        min_query_length: u32,
    },
}

/// Input block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    /// Free-form text input.
    PlainTextInput { action_id: String, multiline: bool },
}

/// A modal view for `views.open` and modal-update responses.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    #[serde(rename = "type")]
    pub view_type: &'static str,
    pub callback_id: String,
    pub title: PlainText,
    pub submit: PlainText,
    pub close: PlainText,
    pub blocks: Vec<Block>,
}

impl View {
    /// Create a modal view.
    #[must_use]
    pub fn modal(
        callback_id: String,
        title: impl Into<String>,
        submit: impl Into<String>,
        blocks: Vec<Block>,
    ) -> Self {
        Self {
            view_type: "modal",
            callback_id,
            title: PlainText::new(title),
            submit: PlainText::new(submit),
            close: PlainText::new("Cancel"),
            blocks,
        }
    }
}

// =============================================================================
// Outbound: response bodies
// =============================================================================

/// An option of an autocomplete response.
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub text: PlainText,
    pub value: String,
}

impl SelectOption {
    /// Build an option whose display text equals its value.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            text: PlainText::new(token.clone()),
            value: token,
        }
    }
}

/// Response body for a `block_suggestion` request.
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub options: Vec<SelectOption>,
}

impl OptionsResponse {
    /// Build a response from emoji tokens.
    #[must_use]
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            options: tokens.into_iter().map(SelectOption::token).collect(),
        }
    }
}

/// Response body asking Slack to re-render an open modal.
#[derive(Debug, Clone, Serialize)]
pub struct ViewUpdateResponse {
    pub response_action: &'static str,
    pub view: View,
}

impl ViewUpdateResponse {
    /// Build an `update` response for the given view.
    #[must_use]
    pub const fn update(view: View) -> Self {
        Self {
            response_action: "update",
            view,
        }
    }
}
