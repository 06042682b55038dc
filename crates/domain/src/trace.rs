use serde::Serialize;

/// Structured trace events emitted across all AriVa crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionCreated {
        session_id: String,
        user_ref: String,
        caller: String,
    },
    SessionClosed {
        session_id: String,
        caller: String,
    },
    SessionsSwept {
        closed: usize,
        stale_after_secs: i64,
    },
    ContextUpdated {
        session_id: String,
        context_chars: usize,
    },
    RequestDispatched {
        method: String,
    },
    RequestRejected {
        method: String,
        kind: String,
    },
    AddressIssued {
        namespace: String,
        label: String,
        address: String,
    },
    SimulationCompleted {
        sessions_created: usize,
        sessions_closed: usize,
        operations_failed: usize,
        duration_ms: u64,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ariva_event");
    }
}
