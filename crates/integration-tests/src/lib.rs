//! Integration test support for the Murmur webhook backend.
//!
//! The webhook routes are exercised end-to-end with `tower::ServiceExt`:
//! requests are signed with the real HMAC helpers and dispatched through
//! the real router, while the Slack and Airtable clients are replaced with
//! recording doubles behind their gateway traits.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p murmur-integration-tests
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use secrecy::SecretString;
use url::Url;

use murmur_server::airtable::{ConfessionRecord, RecordStore, RecordStoreError};
use murmur_server::config::{AirtableConfig, ServerConfig, SlackConfig};
use murmur_server::forward::Forwarder;
use murmur_server::routes;
use murmur_server::slack::{ChatGateway, SlackError, View, compute_signature};
use murmur_server::state::AppState;

/// Signing secret shared between request builders and the test config.
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// The confessions channel the test config designates.
pub const CONFESSIONS_CHANNEL: &str = "C0CONFESS";

// =============================================================================
// Recording doubles
// =============================================================================

/// A message recorded by [`RecordingGateway::post_message`].
#[derive(Debug, Clone)]
pub struct PostedMessage {
    pub channel: String,
    pub text: String,
    pub thread_ts: Option<String>,
}

/// A reaction recorded by [`RecordingGateway::add_reaction`].
#[derive(Debug, Clone)]
pub struct Reaction {
    pub channel: String,
    pub ts: String,
    pub name: String,
}

/// Chat gateway double that records every call.
#[derive(Default)]
pub struct RecordingGateway {
    pub posted: Mutex<Vec<PostedMessage>>,
    pub reactions: Mutex<Vec<Reaction>>,
    pub opened_views: Mutex<Vec<serde_json::Value>>,
    pub responses: Mutex<Vec<(String, String)>>,
    /// Custom emoji names returned from `emoji_list`.
    pub custom_emoji: Vec<String>,
    /// When set, `emoji_list` fails like a dead Slack API would.
    pub fail_emoji_list: bool,
}

impl RecordingGateway {
    /// Gateway with a fixed custom emoji set.
    #[must_use]
    pub fn with_custom_emoji(names: &[&str]) -> Self {
        Self {
            custom_emoji: names.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<String, SlackError> {
        self.posted.lock().expect("lock").push(PostedMessage {
            channel: channel.to_string(),
            text: text.to_string(),
            thread_ts: thread_ts.map(ToString::to_string),
        });
        Ok("1111.2222".to_string())
    }

    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), SlackError> {
        self.reactions.lock().expect("lock").push(Reaction {
            channel: channel.to_string(),
            ts: ts.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    async fn open_view(&self, _trigger_id: &str, view: View) -> Result<(), SlackError> {
        let view = serde_json::to_value(&view).expect("serialize view");
        self.opened_views.lock().expect("lock").push(view);
        Ok(())
    }

    async fn emoji_list(&self) -> Result<Vec<String>, SlackError> {
        if self.fail_emoji_list {
            return Err(SlackError::Api("emoji.list: fatal_error".to_string()));
        }
        Ok(self.custom_emoji.clone())
    }

    async fn respond(&self, response_url: &str, text: &str) -> Result<(), SlackError> {
        self.responses
            .lock()
            .expect("lock")
            .push((response_url.to_string(), text.to_string()));
        Ok(())
    }
}

/// Record store double returning a fixed result for every filter and
/// recording the filter formulas it was asked for.
#[derive(Default)]
pub struct StaticStore {
    pub records: Vec<ConfessionRecord>,
    pub queries: Mutex<Vec<String>>,
}

impl StaticStore {
    /// Store answering every lookup with these records.
    #[must_use]
    pub fn with_records(records: Vec<ConfessionRecord>) -> Self {
        Self {
            records,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RecordStore for StaticStore {
    async fn list(
        &self,
        filter_by_formula: &str,
    ) -> Result<Vec<ConfessionRecord>, RecordStoreError> {
        self.queries
            .lock()
            .expect("lock")
            .push(filter_by_formula.to_string());
        Ok(self.records.clone())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A confession record fixture.
#[must_use]
pub fn confession(
    id: u64,
    submitter_id: &str,
    published_ts: Option<&str>,
    staging_ts: Option<&str>,
) -> ConfessionRecord {
    ConfessionRecord {
        id,
        text: format!("confession #{id}"),
        submitter_id: submitter_id.to_string(),
        published_ts: published_ts.map(ToString::to_string),
        staging_ts: staging_ts.map(ToString::to_string),
    }
}

/// Server config pointing at nothing reachable; the doubles absorb all
/// external calls, and the forwarder target never answers.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().expect("ip"),
        port: 0,
        slack: SlackConfig {
            bot_token: SecretString::from("xoxb-test"),
            signing_secret: SecretString::from(SIGNING_SECRET),
        },
        confessions_channel: CONFESSIONS_CHANNEL.to_string(),
        airtable: AirtableConfig {
            api_key: SecretString::from("key-test"),
            base_id: "appTEST".to_string(),
            table_name: "Confessions".to_string(),
        },
        worker_url: Url::parse("http://127.0.0.1:1/work").expect("url"),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Build the webhook router over the given doubles.
#[must_use]
pub fn test_app(gateway: Arc<RecordingGateway>, store: Arc<StaticStore>) -> Router {
    let config = test_config();
    let forwarder = Forwarder::new(config.worker_url.clone());
    let state = AppState::new(config, gateway, store, forwarder);
    routes::routes().with_state(state)
}

// =============================================================================
// Request builders
// =============================================================================

fn current_timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time before epoch")
        .as_secs()
        .to_string()
}

/// Build a request carrying a valid Slack signature over `body`.
#[must_use]
pub fn signed_request(path: &str, body: String) -> Request<Body> {
    let timestamp = current_timestamp();
    let signature = compute_signature(&SecretString::from(SIGNING_SECRET), &timestamp, &body);

    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("X-Slack-Request-Timestamp", timestamp)
        .header("X-Slack-Signature", signature)
        .body(Body::from(body))
        .expect("request")
}

/// Build a request whose signature will not verify.
#[must_use]
pub fn forged_request(path: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .header("X-Slack-Request-Timestamp", current_timestamp())
        .header("X-Slack-Signature", "v0=0000000000000000")
        .body(Body::from(body))
        .expect("request")
}

/// Build a signed interaction request for a JSON payload.
#[must_use]
pub fn interaction_request(payload: &serde_json::Value) -> Request<Body> {
    let body = format!("payload={}", urlencoding::encode(&payload.to_string()));
    signed_request("/api/slack/interactions", body)
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
