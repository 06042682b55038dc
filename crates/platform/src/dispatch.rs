//! Request routing: parameter validation, capability handlers, and
//! envelope normalization.
//!
//! [`dispatch`] is the typed core: method lookup, required-parameter
//! checks, handler invocation, and the success-side session touch.
//! [`handle_request`] wraps it for wire consumers, folding failures into
//! the uniform error envelope so no other error shape escapes.

use serde_json::{json, Value};

use ariva_domain::error::{Error, Result};
use ariva_domain::trace::TraceEvent;
use ariva_engine::SuggestionKind;
use ariva_protocol::envelope::error_envelope;
use ariva_protocol::methods::method_spec;
use ariva_sessions::Session;

use crate::platform::Platform;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dispatch
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Route one request to its capability handler.
///
/// Unknown methods and missing parameters fail before any handler runs.
/// A call that references an existing session touches it after the handler
/// succeeds (never on failure), so the snapshot a handler returned still
/// shows the pre-call activity timestamp.
pub fn dispatch(platform: &Platform, method: &str, params: &Value) -> Result<Value> {
    let result = route(platform, method, params);

    match &result {
        Ok(_) => {
            if let Some(sid) = params.get("session_id").and_then(Value::as_str) {
                platform.store().touch(sid);
            }
            TraceEvent::RequestDispatched {
                method: method.to_owned(),
            }
            .emit();
        }
        Err(err) => {
            platform.record(|s| s.requests_failed += 1);
            TraceEvent::RequestRejected {
                method: method.to_owned(),
                kind: err.kind().to_owned(),
            }
            .emit();
        }
    }
    platform.record(|s| s.requests_total += 1);

    result
}

/// Dispatch and normalize: handler result mapping on success, the
/// `{"error": …}` envelope on failure.
pub fn handle_request(platform: &Platform, method: &str, params: &Value) -> Value {
    match dispatch(platform, method, params) {
        Ok(body) => body,
        Err(err) => error_envelope(&err),
    }
}

fn route(platform: &Platform, method: &str, params: &Value) -> Result<Value> {
    let spec =
        method_spec(method).ok_or_else(|| Error::UnknownMethod(method.to_owned()))?;

    for field in spec.required {
        if params.get(*field).is_none() {
            return Err(Error::invalid_params(*field, "missing required parameter"));
        }
    }

    match spec.name {
        "create_session" => create_session(platform, params),
        "get_session" => get_session(platform, params),
        "close_session" => close_session(platform, params),
        "validate_code" => validate_code(platform, params),
        "get_completions" => get_completions(platform, params),
        "get_suggestions" => get_suggestions(platform, params),
        "update_context" => update_context(platform, params),
        "stats" => stats(platform),
        "config" => config(platform),
        "cleanup_stale" => cleanup_stale(platform),
        other => Err(Error::UnknownMethod(other.to_owned())),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Parameter extraction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn require_str<'a>(params: &'a Value, field: &'static str) -> Result<&'a str> {
    match params.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::invalid_params(field, "expected a string")),
        None => Err(Error::invalid_params(field, "missing required parameter")),
    }
}

fn require_u64(params: &Value, field: &'static str) -> Result<u64> {
    match params.get(field) {
        Some(v) => v
            .as_u64()
            .ok_or_else(|| Error::invalid_params(field, "expected a non-negative integer")),
        None => Err(Error::invalid_params(field, "missing required parameter")),
    }
}

fn session_body(session: &Session) -> Value {
    json!({
        "session_id": session.session_id,
        "user_ref": session.user_ref,
        "caller": session.caller,
        "created_at": session.created_at.to_rfc3339(),
        "last_active_at": session.last_active_at.to_rfc3339(),
        "context": session.context,
        "status": session.status.as_str(),
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Capability handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn create_session(platform: &Platform, params: &Value) -> Result<Value> {
    let user_ref = require_str(params, "user_ref")?;
    let caller = require_str(params, "caller")?;

    let session = platform.store().create(user_ref, caller)?;
    platform.record(|s| s.sessions_created += 1);
    Ok(session_body(&session))
}

fn get_session(platform: &Platform, params: &Value) -> Result<Value> {
    let session_id = require_str(params, "session_id")?;
    let session = platform.store().get(session_id)?;
    Ok(session_body(&session))
}

fn close_session(platform: &Platform, params: &Value) -> Result<Value> {
    let session_id = require_str(params, "session_id")?;
    let caller = require_str(params, "caller")?;

    let session = platform.store().close(session_id, caller)?;
    platform.record(|s| s.sessions_closed += 1);
    Ok(json!({
        "session_id": session.session_id,
        "status": session.status.as_str(),
    }))
}

fn validate_code(platform: &Platform, params: &Value) -> Result<Value> {
    let code = require_str(params, "code")?;

    let report = platform.validation().validate(code);
    platform.record(|s| s.validations_run += 1);
    Ok(json!({
        "valid": report.valid,
        "errors": report.errors,
    }))
}

fn get_completions(platform: &Platform, params: &Value) -> Result<Value> {
    let session_id = require_str(params, "session_id")?;
    let prefix = require_str(params, "prefix")?;
    let line_context = require_str(params, "line_context")?;
    let language = require_str(params, "language")?;
    let max_n = require_u64(params, "max_n")? as usize;

    // Liveness gate: the engine never runs for a dead session.
    platform.store().get(session_id)?;

    let max_n = max_n.min(platform.config().max_completions);
    let completions = platform
        .completion()
        .complete(prefix, line_context, language, max_n);
    platform.record(|s| s.completions_served += completions.len() as u64);
    Ok(json!({
        "session_id": session_id,
        "count": completions.len(),
        "completions": completions,
    }))
}

fn get_suggestions(platform: &Platform, params: &Value) -> Result<Value> {
    let session_id = require_str(params, "session_id")?;
    let query = require_str(params, "query")?;
    let raw_kind = require_u64(params, "kind")?;
    let max_n = require_u64(params, "max_n")? as usize;

    let kind = SuggestionKind::from_wire(raw_kind)
        .ok_or_else(|| Error::invalid_params("kind", format!("{raw_kind} is not a suggestion kind")))?;

    // Liveness gate: the engine never runs for a dead session.
    platform.store().get(session_id)?;

    let max_n = max_n.min(platform.config().max_suggestions);
    let suggestions = platform.suggestion().suggest(query, kind, max_n);
    platform.record(|s| s.suggestions_served += suggestions.len() as u64);
    Ok(json!({
        "session_id": session_id,
        "kind": kind.as_str(),
        "count": suggestions.len(),
        "suggestions": suggestions,
    }))
}

fn update_context(platform: &Platform, params: &Value) -> Result<Value> {
    let session_id = require_str(params, "session_id")?;
    let context = require_str(params, "context")?;
    let caller = require_str(params, "caller")?;

    let session = platform
        .store()
        .update_context(session_id, context, caller)?;
    platform.record(|s| s.context_updates += 1);
    Ok(session_body(&session))
}

fn stats(platform: &Platform) -> Result<Value> {
    let counts = platform.store().counts();
    Ok(json!({
        "sessions": counts,
        "counters": platform.stats(),
    }))
}

fn config(platform: &Platform) -> Result<Value> {
    let cfg = platform.config();
    Ok(json!({
        "max_sessions": cfg.max_sessions,
        "stale_after_secs": cfg.stale_after_secs,
        "max_completions": cfg.max_completions,
        "max_suggestions": cfg.max_suggestions,
        "namespace": cfg.namespace,
        "coordinator": platform.coordinator(),
    }))
}

fn cleanup_stale(platform: &Platform) -> Result<Value> {
    let stale_after = chrono::Duration::seconds(platform.config().stale_after_secs as i64);
    let closed = platform.store().sweep(stale_after);
    platform.record(|s| s.sessions_swept += closed as u64);
    Ok(json!({ "closed": closed }))
}
