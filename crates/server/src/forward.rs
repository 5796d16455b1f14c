//! Slash-command forwarding.
//!
//! Slack expects a slash command to be acknowledged within three seconds,
//! which is not enough for the submission pipeline. The commands endpoint
//! therefore verifies the request, hands its body to the worker, and
//! acknowledges immediately; the worker responds to the user later through
//! the command's `response_url`.

use tracing::{debug, instrument};
use url::Url;

/// Forwards verified slash-command bodies to the worker.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    target: Url,
}

impl Forwarder {
    /// Create a forwarder posting to `target`.
    #[must_use]
    pub fn new(target: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            target,
        }
    }

    /// POST the raw request body to the worker, preserving its content type.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the worker responds with a
    /// non-success status. Callers log the error and acknowledge anyway;
    /// the outcome is never surfaced to Slack.
    #[instrument(skip(self, body))]
    pub async fn forward(
        &self,
        content_type: Option<&str>,
        body: String,
    ) -> Result<(), reqwest::Error> {
        let mut request = self.client.post(self.target.clone()).body(body);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        request.send().await?.error_for_status()?;

        debug!("Request forwarded to worker");
        Ok(())
    }
}
