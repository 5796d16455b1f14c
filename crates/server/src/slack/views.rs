//! Modal view builders for the anonymous reply/react flows.
//!
//! Each builder encodes the correlation context into the view's callback id
//! via [`ModalContext`], so the later `view_submission` callback can recover
//! which confession the modal concerns without server-side session state.

use crate::correlation::ModalContext;

use super::types::{Block, InputElement, PlainText, SelectAccessory, Text, View};

/// Build the anonymous-reply modal for a confession.
///
/// The modal carries a single multiline text input; its callback id embeds
/// the confession's published timestamp.
#[must_use]
pub fn reply_modal(confession_id: u64, published_ts: &str) -> View {
    View::modal(
        ModalContext::reply(published_ts).encode(),
        format!("Replying to #{confession_id}"),
        "Reply",
        vec![Block::Input {
            block_id: "reply".to_string(),
            label: PlainText::new("Reply"),
            element: InputElement::PlainTextInput {
                action_id: "confession_reply".to_string(),
                multiline: true,
            },
        }],
    )
}

/// Build the anonymous-react modal for a confession.
///
/// The emoji picker is an `external_select`, so Slack calls back into the
/// block suggestion endpoint for options as the user types. The callback id
/// embeds both the confession's published timestamp and the timestamp of
/// the message that was clicked (the reaction target).
#[must_use]
pub fn react_modal(confession_id: u64, published_ts: &str, message_ts: &str) -> View {
    View::modal(
        ModalContext::react(published_ts, message_ts).encode(),
        format!("Reacting to #{confession_id}"),
        "React",
        vec![Block::Section {
            block_id: Some("emoji".to_string()),
            text: Text::plain("Pick an emoji to react with"),
            accessory: Some(SelectAccessory::ExternalSelect {
                placeholder: PlainText::new("Select an emoji"),
                action_id: "emoji".to_string(),
                min_query_length: 4,
            }),
        }],
    )
}

/// Append a rejection notice to a modal, for re-rendering it in place.
///
/// Used when the ownership check fails at submission time: the modal stays
/// open and the user sees the failure inline.
#[must_use]
pub fn with_rejection(mut view: View, text: &str) -> View {
    view.blocks.push(Block::Section {
        block_id: None,
        text: Text::mrkdwn(text),
        accessory: None,
    });
    view
}
