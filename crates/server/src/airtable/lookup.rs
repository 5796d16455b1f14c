//! Exactly-one record lookup.
//!
//! Every confession lookup must resolve to a single record; zero matches
//! and multiple matches are distinct, typed failures rather than strings
//! thrown from the middle of a branch.

use thiserror::Error;

use super::types::ConfessionRecord;
use super::{RecordStore, RecordStoreError};

/// A lookup that did not produce exactly one record.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No record matched the filter.
    #[error("no record matched {formula}")]
    NotFound {
        /// The filter formula that was queried.
        formula: String,
    },

    /// More than one record matched the filter.
    #[error("{count} records matched {formula}")]
    Ambiguous {
        /// The filter formula that was queried.
        formula: String,
        /// How many records came back.
        count: usize,
    },

    /// The store request itself failed.
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}

/// Look up the single record matching `formula`.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] for zero matches,
/// [`LookupError::Ambiguous`] for more than one, and
/// [`LookupError::Store`] if the store call fails.
pub async fn find_single(
    store: &dyn RecordStore,
    formula: &str,
) -> Result<ConfessionRecord, LookupError> {
    let mut records = store.list(formula).await?;

    match records.len() {
        1 => Ok(records.swap_remove(0)),
        0 => Err(LookupError::NotFound {
            formula: formula.to_string(),
        }),
        count => Err(LookupError::Ambiguous {
            formula: formula.to_string(),
            count,
        }),
    }
}
