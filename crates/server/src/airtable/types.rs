//! Confession record type.

use serde::Deserialize;

/// A confession row from the Airtable table.
///
/// Only the fields the webhook handlers read are modeled; Airtable omits
/// empty cells, so the timestamp fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfessionRecord {
    /// Display number of the confession (the `#123` users see).
    pub id: u64,
    /// The confession text.
    pub text: String,
    /// Slack user id of the original submitter.
    pub submitter_id: String,
    /// Timestamp of the published channel message, once published.
    #[serde(default)]
    pub published_ts: Option<String>,
    /// Timestamp of the staged moderation message.
    #[serde(default)]
    pub staging_ts: Option<String>,
}

impl ConfessionRecord {
    /// Whether `user_id` is the confession's original submitter.
    #[must_use]
    pub fn is_submitter(&self, user_id: &str) -> bool {
        self.submitter_id == user_id
    }
}
