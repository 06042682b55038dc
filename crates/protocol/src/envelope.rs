//! Envelope normalization.
//!
//! Success responses are the handler's result mapping verbatim — no extra
//! nesting. Failures all take the one shape below, so a caller can branch
//! on the presence of `error` alone.

use serde_json::{json, Value};

use ariva_domain::error::Error;

/// Wrap a protocol error as `{"error": {"kind", "message", "field"?}}`.
///
/// `field` appears only when the error names an offending parameter.
pub fn error_envelope(err: &Error) -> Value {
    let mut body = json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    if let Some(field) = err.field() {
        body["field"] = json!(field);
    }
    json!({ "error": body })
}
