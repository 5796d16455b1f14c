//! Modal correlation codec.
//!
//! Modals are stateless on the server side: the context a submission needs
//! (which confession, which message to react to) travels inside the view's
//! callback id. This module is the single place that encoding lives, so
//! every branch agrees on the format:
//!
//! ```text
//! reply_modal_<published_ts>
//! react_modal_<published_ts>_<thread_ts>
//! ```
//!
//! Timestamps are opaque Slack `seconds.micros` strings and contain no `_`,
//! so `react` splits the tail at its last underscore.

/// Context carried through a modal's callback id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContext {
    /// Anonymous reply to the confession published at `published_ts`.
    Reply {
        /// Timestamp of the published confession message.
        published_ts: String,
    },
    /// Anonymous reaction on behalf of the confession's submitter.
    React {
        /// Timestamp of the published confession message.
        published_ts: String,
        /// Timestamp of the message to react to (the confession itself or
        /// one of its threaded replies).
        thread_ts: String,
    },
}

const REPLY_PREFIX: &str = "reply_modal_";
const REACT_PREFIX: &str = "react_modal_";

impl ModalContext {
    /// Context for an anonymous reply.
    #[must_use]
    pub fn reply(published_ts: impl Into<String>) -> Self {
        Self::Reply {
            published_ts: published_ts.into(),
        }
    }

    /// Context for an anonymous reaction.
    #[must_use]
    pub fn react(published_ts: impl Into<String>, thread_ts: impl Into<String>) -> Self {
        Self::React {
            published_ts: published_ts.into(),
            thread_ts: thread_ts.into(),
        }
    }

    /// Encode the context as a callback id.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Reply { published_ts } => format!("{REPLY_PREFIX}{published_ts}"),
            Self::React {
                published_ts,
                thread_ts,
            } => format!("{REACT_PREFIX}{published_ts}_{thread_ts}"),
        }
    }

    /// Decode a callback id back into its context.
    ///
    /// Returns `None` when the id does not match either fixed pattern or
    /// any embedded timestamp is empty; callers treat that as a terminal
    /// failure for the request.
    #[must_use]
    pub fn parse(callback_id: &str) -> Option<Self> {
        if let Some(published_ts) = callback_id.strip_prefix(REPLY_PREFIX) {
            if published_ts.is_empty() {
                return None;
            }
            return Some(Self::reply(published_ts));
        }

        if let Some(tail) = callback_id.strip_prefix(REACT_PREFIX) {
            let (published_ts, thread_ts) = tail.rsplit_once('_')?;
            if published_ts.is_empty() || thread_ts.is_empty() {
                return None;
            }
            return Some(Self::react(published_ts, thread_ts));
        }

        None
    }
}
