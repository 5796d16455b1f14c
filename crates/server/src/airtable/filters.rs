//! Filter formula builders.
//!
//! Every lookup goes through these, so quoting and escaping live in one
//! place instead of being templated inline at each call site.

/// Formula matching the record published at `ts`.
#[must_use]
pub fn by_published_ts(ts: &str) -> String {
    format!("{{published_ts}} = '{}'", escape(ts))
}

/// Formula matching the record published at `ts`, or at `thread_ts` when
/// the interaction came from a threaded reply.
#[must_use]
pub fn by_published_ts_or(ts: &str, thread_ts: Option<&str>) -> String {
    match thread_ts {
        Some(thread_ts) => format!(
            "OR({{published_ts}} = '{}', {{published_ts}} = '{}')",
            escape(ts),
            escape(thread_ts)
        ),
        None => by_published_ts(ts),
    }
}

/// Formula matching the record staged for moderation at `ts`.
#[must_use]
pub fn by_staging_ts(ts: &str) -> String {
    format!("{{staging_ts}} = '{}'", escape(ts))
}

/// Escape a value for use inside a single-quoted formula string.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
