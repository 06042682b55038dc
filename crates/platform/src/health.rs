//! Health probe and the scripted demo exercise.

use serde_json::{json, Value};

use ariva_protocol::methods::METHODS;

use crate::dispatch::handle_request;
use crate::platform::Platform;

/// Liveness snapshot of a handle: session counts, registry size, and the
/// identity book's uniqueness confirmations.
pub fn health_check(platform: &Platform) -> Value {
    let counts = platform.store().counts();
    json!({
        "status": "ok",
        "active_sessions": counts.active,
        "total_sessions": counts.total,
        "methods": METHODS.len(),
        "addresses_unique": platform.confirm_addresses_unique(),
        "coordinator": platform.coordinator(),
    })
}

/// Scripted end-to-end pass over the dispatch surface: create a session,
/// run one request per assistance capability, read stats, close. Returns
/// the collected envelopes keyed by step; leaves no session behind.
pub fn run_demo(platform: &Platform) -> Value {
    let caller = platform.issue_caller("demo");
    let created = handle_request(
        platform,
        "create_session",
        &json!({ "user_ref": "demo", "caller": caller }),
    );
    let session_id = created["session_id"].as_str().unwrap_or_default().to_owned();

    let validated = handle_request(
        platform,
        "validate_code",
        &json!({ "code": "fn demo() { let x = 1; }" }),
    );
    let completions = handle_request(
        platform,
        "get_completions",
        &json!({
            "session_id": session_id,
            "prefix": "le",
            "line_context": "let x",
            "language": "rs",
            "max_n": 5,
        }),
    );
    let suggestions = handle_request(
        platform,
        "get_suggestions",
        &json!({ "session_id": session_id, "query": "document", "kind": 3, "max_n": 5 }),
    );
    let context = handle_request(
        platform,
        "update_context",
        &json!({ "session_id": session_id, "context": "project: demo", "caller": caller }),
    );
    let stats = handle_request(platform, "stats", &json!({}));
    let closed = handle_request(
        platform,
        "close_session",
        &json!({ "session_id": session_id, "caller": caller }),
    );

    json!({
        "session_id": session_id,
        "steps": {
            "create_session": created,
            "validate_code": validated,
            "get_completions": completions,
            "get_suggestions": suggestions,
            "update_context": context,
            "stats": stats,
            "close_session": closed,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::create_platform;

    #[test]
    fn fresh_handle_is_healthy_and_idle() {
        let platform = create_platform();
        let health = health_check(&platform);
        assert_eq!(health["status"], "ok");
        assert_eq!(health["active_sessions"], 0);
        assert_eq!(health["methods"], 10);
        assert_eq!(health["addresses_unique"], true);
    }

    #[test]
    fn demo_completes_every_step_and_cleans_up() {
        let platform = create_platform();
        let demo = run_demo(&platform);

        let steps = demo["steps"].as_object().unwrap();
        assert_eq!(steps.len(), 7);
        for (step, body) in steps {
            assert!(body.get("error").is_none(), "step {step} failed: {body}");
        }

        assert_eq!(platform.store().counts().active, 0);
        assert_eq!(demo["steps"]["close_session"]["status"], "closed");
    }
}
