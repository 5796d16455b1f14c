//! Slack integration for the confession flows.
//!
//! This module provides:
//! - [`SlackClient`] for the Web API calls the bot makes
//! - [`ChatGateway`] as the injectable seam over those calls
//! - Block Kit types for modals and autocomplete options
//! - Modal builders for the reply/react flows
//! - Webhook signature verification
//!
//! # Flow
//!
//! 1. A confession is published to the channel (by the worker, not here)
//! 2. Its submitter invokes a message shortcut on the published message
//! 3. The webhook handler verifies the signature and opens a modal
//! 4. The modal submission comes back, the reply or reaction is posted

mod client;
mod error;
mod gateway;
mod signature;
mod types;
mod views;

pub use client::SlackClient;
pub use error::SlackError;
pub use gateway::ChatGateway;
pub use signature::{compute_signature, verify_signature};
pub use types::{
    ActionRef, Block, BlockActionsPayload, BlockSuggestionPayload, ChannelRef, InputElement,
    InputValue, InteractionPayload, MessageActionPayload, MessageRef, OptionsResponse, PlainText,
    SelectAccessory, SelectOption, SelectedOption, Text, UserRef, View, ViewPayload, ViewState,
    ViewSubmissionPayload, ViewUpdateResponse,
};
pub use views::{react_modal, reply_modal, with_rejection};
