//! JSON rendering helpers.
//!
//! Server replies are arbitrary JSON that is never schema-validated; they are
//! only re-indented for reading. Anything that fails to parse is passed
//! through untouched.

use std::borrow::Cow;

use serde_json::Value as JsonValue;

/// Pretty-print a payload as indented JSON.
///
/// Returns the input unchanged when it is not well-formed JSON (or when
/// re-serialization fails), so raw server output is never lost.
pub fn pretty(raw: &str) -> Cow<'_, str> {
    match serde_json::from_str::<JsonValue>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).map_or(Cow::Borrowed(raw), Cow::Owned),
        Err(_) => Cow::Borrowed(raw),
    }
}
