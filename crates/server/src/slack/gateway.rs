//! Injectable seam over the Slack Web API operations the bot uses.

use async_trait::async_trait;

use super::error::SlackError;
use super::types::View;

/// The Slack operations webhook handlers compose.
///
/// Implemented by [`SlackClient`](super::SlackClient) in production and by
/// recording doubles in tests. Every call is single-attempt; failures are
/// reported to the caller, never retried.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post a message to a channel, optionally as a threaded reply.
    ///
    /// Returns the timestamp of the posted message.
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<String, SlackError>;

    /// Add an emoji reaction to a message.
    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), SlackError>;

    /// Open a modal view for the interaction identified by `trigger_id`.
    async fn open_view(&self, trigger_id: &str, view: View) -> Result<(), SlackError>;

    /// List the names of the workspace's custom emoji.
    async fn emoji_list(&self) -> Result<Vec<String>, SlackError>;

    /// Post a plain text follow-up to an interaction's `response_url`.
    async fn respond(&self, response_url: &str, text: &str) -> Result<(), SlackError>;
}
