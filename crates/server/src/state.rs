//! Application state shared across handlers.

use std::sync::Arc;

use crate::airtable::RecordStore;
use crate::config::ServerConfig;
use crate::forward::Forwarder;
use crate::slack::ChatGateway;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The Slack and record store
/// clients are held behind their gateway traits so tests can substitute
/// recording doubles.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    chat: Arc<dyn ChatGateway>,
    records: Arc<dyn RecordStore>,
    forwarder: Forwarder,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        chat: Arc<dyn ChatGateway>,
        records: Arc<dyn RecordStore>,
        forwarder: Forwarder,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                chat,
                records,
                forwarder,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the Slack gateway.
    #[must_use]
    pub fn chat(&self) -> &dyn ChatGateway {
        self.inner.chat.as_ref()
    }

    /// Get a reference to the confession record store.
    #[must_use]
    pub fn records(&self) -> &dyn RecordStore {
        self.inner.records.as_ref()
    }

    /// Get a reference to the slash-command forwarder.
    #[must_use]
    pub fn forwarder(&self) -> &Forwarder {
        &self.inner.forwarder
    }
}
