//! Boundary adapters: query-string parsing and response shaping.
//!
//! # Responsibility
//! - Turn raw request query strings into typed parameters.
//! - Shape service results into the listing, detail and search payloads.
//!
//! # Invariants
//! - Malformed parameters fall back to defaults; they are never errors.
//! - Repeated keys resolve to their first occurrence.

pub mod detail;
pub mod listing;
pub mod search;

use url::form_urlencoded;

/// Returns the first decoded value of `key` in a raw query string.
///
/// A leading `?` is ignored; `+` and percent escapes are decoded.
pub fn query_value(raw: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}
