//! Airtable client for the confessions record store.
//!
//! Confession records live in a single Airtable table; this backend only
//! ever reads them, via `filterByFormula` lookups. Publication bookkeeping
//! (writing `published_ts` and friends) belongs to the submission worker,
//! not to the webhook handlers.
//!
//! # API Reference
//!
//! - Base URL: `https://api.airtable.com/v0`
//! - Authentication: API key via `Authorization: Bearer <key>`

mod filters;
mod lookup;
mod types;

pub use filters::{by_published_ts, by_published_ts_or, by_staging_ts};
pub use lookup::{LookupError, find_single};
pub use types::ConfessionRecord;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::AirtableConfig;

/// Airtable API base URL.
const BASE_URL: &str = "https://api.airtable.com/v0";

/// One page is plenty: lookups expect exactly one matching record.
const PAGE_SIZE: u32 = 100;

/// Errors that can occur when talking to the record store.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The record store operations webhook handlers compose.
///
/// Implemented by [`AirtableClient`] in production and by fixed-result
/// doubles in tests. Read-only by design.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List the records matching a filter formula (first page only).
    async fn list(
        &self,
        filter_by_formula: &str,
    ) -> Result<Vec<ConfessionRecord>, RecordStoreError>;
}

/// Airtable API client.
#[derive(Clone)]
pub struct AirtableClient {
    inner: Arc<AirtableClientInner>,
}

struct AirtableClientInner {
    client: reqwest::Client,
    table_url: String,
}

/// Wire shape of a list response.
#[derive(Debug, Deserialize)]
struct ListResponse {
    records: Vec<RecordEnvelope>,
}

/// Wire shape of a single record.
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    fields: ConfessionRecord,
}

impl AirtableClient {
    /// Create a new Airtable API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &AirtableConfig) -> Result<Self, RecordStoreError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| RecordStoreError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let table = urlencoding::encode(&config.table_name);
        Ok(Self {
            inner: Arc::new(AirtableClientInner {
                client,
                table_url: format!("{BASE_URL}/{}/{table}", config.base_id),
            }),
        })
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    #[instrument(skip(self))]
    async fn list(
        &self,
        filter_by_formula: &str,
    ) -> Result<Vec<ConfessionRecord>, RecordStoreError> {
        let response = self
            .inner
            .client
            .get(&self.inner.table_url)
            .query(&[
                ("filterByFormula", filter_by_formula),
                ("pageSize", &PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecordStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let page: ListResponse = response
            .json()
            .await
            .map_err(|e| RecordStoreError::Parse(e.to_string()))?;

        debug!(count = page.records.len(), "Records listed");
        Ok(page.records.into_iter().map(|r| r.fields).collect())
    }
}
