//! Synthetic workloads over the dispatch surface.
//!
//! Both harnesses drive the public [`handle_request`] path (nothing
//! reaches into the store directly) and close every session they create,
//! so a run leaves the platform idle. With the reference engines, every
//! count in the report is reproducible; only `duration_ms` varies.

use std::time::Instant;

use serde::Serialize;
use serde_json::{json, Value};

use ariva_domain::trace::TraceEvent;

use crate::dispatch::handle_request;
use crate::platform::Platform;

/// Aggregate outcome of one simulation run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SimulationReport {
    pub sessions_created: usize,
    pub sessions_closed: usize,
    pub operations_ok: usize,
    pub operations_failed: usize,
    pub duration_ms: u64,
}

/// Drive `num_sessions` sessions through a fixed scripted sequence:
/// create, validate, completions, suggestions, update-context, close.
pub fn run_simulation(platform: &Platform, num_sessions: usize) -> SimulationReport {
    let started = Instant::now();
    let mut report = SimulationReport::default();

    for i in 0..num_sessions {
        let user_ref = format!("sim-user-{i}");
        let caller = platform.issue_caller(&user_ref);
        drive_session(platform, &user_ref, &caller, i, &mut report);
    }

    finish(platform, started, report)
}

/// Same shape as [`run_simulation`], but modeling `num_users` synthetic
/// users holding several sessions each (one to three, by user ordinal).
pub fn run_simulation_v2(platform: &Platform, num_users: usize) -> SimulationReport {
    let started = Instant::now();
    let mut report = SimulationReport::default();

    for u in 0..num_users {
        let user_ref = format!("sim2-user-{u}");
        let caller = platform.issue_caller(&user_ref);
        let sessions_for_user = 1 + u % 3;
        for s in 0..sessions_for_user {
            drive_session(platform, &user_ref, &caller, u * 8 + s, &mut report);
        }
    }

    finish(platform, started, report)
}

/// One session's scripted lifetime. Failures are tallied, never fatal.
fn drive_session(
    platform: &Platform,
    user_ref: &str,
    caller: &str,
    seed: usize,
    report: &mut SimulationReport,
) {
    let created = handle_request(
        platform,
        "create_session",
        &json!({ "user_ref": user_ref, "caller": caller }),
    );
    let Some(session_id) = created.get("session_id").and_then(Value::as_str) else {
        report.operations_failed += 1;
        return;
    };
    let session_id = session_id.to_owned();
    report.sessions_created += 1;
    report.operations_ok += 1;

    let script = [
        (
            "validate_code",
            json!({ "code": format!("fn sample_{seed}() {{ let v = {seed}; }}") }),
        ),
        (
            "get_completions",
            json!({
                "session_id": session_id,
                "prefix": "le",
                "line_context": "let v",
                "language": "rs",
                "max_n": 5,
            }),
        ),
        (
            "get_suggestions",
            json!({
                "session_id": session_id,
                "query": "fix the loop",
                "kind": seed as u64 % 4,
                "max_n": 5,
            }),
        ),
        (
            "update_context",
            json!({
                "session_id": session_id,
                "context": format!("project: simulation-{seed}"),
                "caller": caller,
            }),
        ),
    ];
    for (method, params) in script {
        tally(report, &handle_request(platform, method, &params));
    }

    let closed = handle_request(
        platform,
        "close_session",
        &json!({ "session_id": session_id, "caller": caller }),
    );
    if closed.get("error").is_none() {
        report.sessions_closed += 1;
        report.operations_ok += 1;
    } else {
        report.operations_failed += 1;
    }
}

fn tally(report: &mut SimulationReport, body: &Value) {
    if body.get("error").is_none() {
        report.operations_ok += 1;
    } else {
        report.operations_failed += 1;
    }
}

fn finish(platform: &Platform, started: Instant, mut report: SimulationReport) -> SimulationReport {
    // A session whose close failed mid-script must not outlive the run;
    // the coordinator closes the stragglers.
    for session_id in platform.store().active_ids() {
        let closed = handle_request(
            platform,
            "close_session",
            &json!({ "session_id": session_id, "caller": platform.coordinator() }),
        );
        if closed.get("error").is_none() {
            report.sessions_closed += 1;
        }
    }

    report.duration_ms = started.elapsed().as_millis() as u64;

    TraceEvent::SimulationCompleted {
        sessions_created: report.sessions_created,
        sessions_closed: report.sessions_closed,
        operations_failed: report.operations_failed,
        duration_ms: report.duration_ms,
    }
    .emit();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::create_platform;

    #[test]
    fn simulation_closes_everything_it_creates() {
        let platform = create_platform();
        let report = run_simulation(&platform, 5);

        assert_eq!(report.sessions_created, 5);
        assert_eq!(report.sessions_closed, 5);
        assert_eq!(report.operations_failed, 0);
        assert_eq!(platform.store().counts().active, 0);
    }

    #[test]
    fn simulation_v2_scales_sessions_per_user() {
        let platform = create_platform();
        let report = run_simulation_v2(&platform, 4);

        // Users 0..4 hold 1 + u % 3 sessions: 1 + 2 + 3 + 1.
        assert_eq!(report.sessions_created, 7);
        assert_eq!(report.sessions_closed, 7);
        assert_eq!(platform.store().counts().active, 0);
    }

    #[test]
    fn zero_sessions_is_a_no_op() {
        let platform = create_platform();
        let report = run_simulation(&platform, 0);
        assert_eq!(report.sessions_created, 0);
        assert_eq!(report.operations_ok, 0);
        assert_eq!(report.operations_failed, 0);
    }
}
