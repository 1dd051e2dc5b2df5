//! The fixed filter library
//!
//! Each filter is a pure string map with no access to outside state. Case
//! conversion comes from the MiniJinja builtins (`upper`, `lower`); only the
//! two filters the builtins lack are defined here.

use base64::Engine as _;
use minijinja::Value;

/// Wrap a value in double quotes, escaping embedded quotes and backslashes
///
/// Usage: {{ name | quote }}
#[must_use]
pub fn quote(value: Value) -> String {
    let s = match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    };
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Standard base64 encoding, for Secret data fields
///
/// Usage: {{ password | b64encode }}
#[must_use]
pub fn b64encode(value: String) -> String {
    base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
}
