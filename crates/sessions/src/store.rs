//! Platform-owned session store.
//!
//! Keeps every session record of one platform handle in memory. Closed
//! sessions stay behind as tombstones so repeat closes and aggregate counts
//! stay deterministic, but every read path treats them as absent: a caller
//! cannot tell a closed session from one that never existed.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use ariva_domain::error::{Error, Result};
use ariva_domain::trace::TraceEvent;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Lifecycle state of a session. The transition `Active → Closed` happens
/// exactly once; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

/// A single code-assistance session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_ref: String,
    /// Address token of the actor that created the session. Close and
    /// context replacement require an exact match against this or the
    /// coordinator address.
    pub caller: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    #[serde(default)]
    pub context: String,
    pub status: SessionStatus,
}

/// Aggregate record counts, reported by `stats` and the health probe.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StoreCounts {
    pub active: usize,
    pub closed: usize,
    pub total: usize,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// In-memory session store shared by every handler of one platform handle.
pub struct SessionStore {
    coordinator: String,
    max_sessions: usize,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Build a store authorizing `coordinator` on every session, with
    /// capacity for `max_sessions` concurrently active sessions.
    pub fn new(coordinator: impl Into<String>, max_sessions: usize) -> Self {
        Self {
            coordinator: coordinator.into(),
            max_sessions,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a new active session owned by `caller`.
    pub fn create(&self, user_ref: &str, caller: &str) -> Result<Session> {
        let mut sessions = self.sessions.write();

        let active = sessions
            .values()
            .filter(|s| s.status == SessionStatus::Active)
            .count();
        if active >= self.max_sessions {
            return Err(Error::ResourceExhausted(format!(
                "session capacity {} reached",
                self.max_sessions
            )));
        }

        let now = Utc::now();
        let session = Session {
            session_id: uuid::Uuid::new_v4().to_string(),
            user_ref: user_ref.to_owned(),
            caller: caller.to_owned(),
            created_at: now,
            last_active_at: now,
            context: String::new(),
            status: SessionStatus::Active,
        };
        sessions.insert(session.session_id.clone(), session.clone());

        TraceEvent::SessionCreated {
            session_id: session.session_id.clone(),
            user_ref: user_ref.to_owned(),
            caller: caller.to_owned(),
        }
        .emit();

        Ok(session)
    }

    /// Snapshot an active session. The snapshot reflects the state before
    /// any touch the current request may apply afterwards.
    pub fn get(&self, session_id: &str) -> Result<Session> {
        let sessions = self.sessions.read();
        match sessions.get(session_id) {
            Some(s) if s.status == SessionStatus::Active => Ok(s.clone()),
            _ => Err(Error::NotFound(format!("session {session_id}"))),
        }
    }

    /// Update `last_active_at`. No-op when the session is absent or closed.
    pub fn touch(&self, session_id: &str) {
        let mut sessions = self.sessions.write();
        if let Some(s) = sessions.get_mut(session_id) {
            if s.status == SessionStatus::Active {
                s.last_active_at = Utc::now();
            }
        }
    }

    /// Close a session on behalf of `caller`. Authorization runs before the
    /// status transition; a failed call leaves the record untouched.
    pub fn close(&self, session_id: &str, caller: &str) -> Result<Session> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(session_id)
            .filter(|s| s.status == SessionStatus::Active)
            .ok_or_else(|| Error::NotFound(format!("session {session_id}")))?;

        if caller != entry.caller && caller != self.coordinator {
            return Err(Error::Unauthorized(format!(
                "caller {caller} may not close session {session_id}"
            )));
        }

        entry.status = SessionStatus::Closed;
        let closed = entry.clone();

        TraceEvent::SessionClosed {
            session_id: session_id.to_owned(),
            caller: caller.to_owned(),
        }
        .emit();

        Ok(closed)
    }

    /// Replace the free-form context document. Same authorization as
    /// [`close`](Self::close); the replacement is the only mutation.
    pub fn update_context(&self, session_id: &str, context: &str, caller: &str) -> Result<Session> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(session_id)
            .filter(|s| s.status == SessionStatus::Active)
            .ok_or_else(|| Error::NotFound(format!("session {session_id}")))?;

        if caller != entry.caller && caller != self.coordinator {
            return Err(Error::Unauthorized(format!(
                "caller {caller} may not update session {session_id}"
            )));
        }

        entry.context = context.to_owned();

        TraceEvent::ContextUpdated {
            session_id: session_id.to_owned(),
            context_chars: context.chars().count(),
        }
        .emit();

        Ok(entry.clone())
    }

    /// Close every active session idle longer than `stale_after`. Returns
    /// the number closed.
    pub fn sweep(&self, stale_after: Duration) -> usize {
        self.sweep_at(stale_after, Utc::now())
    }

    /// Sweep against an explicit `now`, so staleness is testable without a
    /// real clock. A session racing a concurrent `close` is counted by
    /// exactly one of the two; the write lock serializes the transition.
    pub fn sweep_at(&self, stale_after: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let mut closed = 0;
        for s in sessions.values_mut() {
            if s.status == SessionStatus::Active
                && now.signed_duration_since(s.last_active_at) > stale_after
            {
                s.status = SessionStatus::Closed;
                closed += 1;
            }
        }
        drop(sessions);

        if closed > 0 {
            TraceEvent::SessionsSwept {
                closed,
                stale_after_secs: stale_after.num_seconds(),
            }
            .emit();
        }
        closed
    }

    /// Active / closed / total record counts.
    pub fn counts(&self) -> StoreCounts {
        let sessions = self.sessions.read();
        let active = sessions
            .values()
            .filter(|s| s.status == SessionStatus::Active)
            .count();
        StoreCounts {
            active,
            closed: sessions.len() - active,
            total: sessions.len(),
        }
    }

    /// IDs of every active session.
    pub fn active_ids(&self) -> Vec<String> {
        self.sessions
            .read()
            .values()
            .filter(|s| s.status == SessionStatus::Active)
            .map(|s| s.session_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORD: &str = "0xc0ord";

    fn store() -> SessionStore {
        SessionStore::new(COORD, 16)
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = store();
        let created = store.create("alice", "0xa1").unwrap();
        let fetched = store.get(&created.session_id).unwrap();
        assert_eq!(fetched.user_ref, "alice");
        assert_eq!(fetched.caller, "0xa1");
        assert_eq!(fetched.created_at, fetched.last_active_at);
        assert_eq!(fetched.status, SessionStatus::Active);
    }

    #[test]
    fn session_ids_are_unique() {
        let store = store();
        let a = store.create("alice", "0xa1").unwrap();
        let b = store.create("alice", "0xa1").unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn close_requires_owning_caller() {
        let store = store();
        let s = store.create("alice", "0xa1").unwrap();

        let err = store.close(&s.session_id, "0xb2").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        // Rejected close leaves the session active.
        assert!(store.get(&s.session_id).is_ok());

        store.close(&s.session_id, "0xa1").unwrap();
        assert!(matches!(
            store.get(&s.session_id).unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn coordinator_may_close_any_session() {
        let store = store();
        let s = store.create("alice", "0xa1").unwrap();
        store.close(&s.session_id, COORD).unwrap();
    }

    #[test]
    fn double_close_reports_not_found() {
        let store = store();
        let s = store.create("alice", "0xa1").unwrap();
        store.close(&s.session_id, "0xa1").unwrap();
        let err = store.close(&s.session_id, "0xa1").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn touch_ignores_closed_and_absent_sessions() {
        let store = store();
        let s = store.create("alice", "0xa1").unwrap();
        store.close(&s.session_id, "0xa1").unwrap();

        store.touch(&s.session_id);
        store.touch("no-such-session");

        // Neither touch resurrects anything.
        assert!(store.get(&s.session_id).is_err());
        assert_eq!(store.counts().closed, 1);
    }

    #[test]
    fn update_context_replaces_document() {
        let store = store();
        let s = store.create("alice", "0xa1").unwrap();
        let updated = store
            .update_context(&s.session_id, "project: lib", "0xa1")
            .unwrap();
        assert_eq!(updated.context, "project: lib");

        let err = store
            .update_context(&s.session_id, "hijack", "0xb2")
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(store.get(&s.session_id).unwrap().context, "project: lib");
    }

    #[test]
    fn capacity_is_enforced_on_active_sessions() {
        let store = SessionStore::new(COORD, 2);
        store.create("alice", "0xa1").unwrap();
        let second = store.create("bob", "0xb2").unwrap();

        let err = store.create("carol", "0xc3").unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted(_)));

        // Closing a session frees its slot.
        store.close(&second.session_id, "0xb2").unwrap();
        store.create("carol", "0xc3").unwrap();
    }

    #[test]
    fn sweep_closes_only_stale_sessions() {
        let store = store();
        let stale = store.create("alice", "0xa1").unwrap();
        let fresh = store.create("bob", "0xb2").unwrap();
        store.touch(&fresh.session_id);

        // Evaluate an hour in the future against a 30 minute threshold,
        // after backdating nothing: both sessions look stale.
        let later = Utc::now() + Duration::hours(1);
        let closed = store.sweep_at(Duration::minutes(30), later);
        assert_eq!(closed, 2);
        assert!(store.get(&stale.session_id).is_err());
        assert!(store.get(&fresh.session_id).is_err());

        // A second sweep with no intervening activity closes nothing.
        assert_eq!(store.sweep_at(Duration::minutes(30), later), 0);
    }

    #[test]
    fn sweep_spares_recently_active_sessions() {
        let store = store();
        store.create("alice", "0xa1").unwrap();
        let closed = store.sweep_at(Duration::minutes(30), Utc::now());
        assert_eq!(closed, 0);
        assert_eq!(store.counts().active, 1);
    }

    #[test]
    fn close_and_sweep_race_resolves_each_session_once() {
        let store = SessionStore::new(COORD, 64);
        let ids: Vec<String> = (0..32)
            .map(|i| store.create(&format!("user-{i}"), COORD).unwrap().session_id)
            .collect();
        let later = Utc::now() + Duration::hours(1);

        std::thread::scope(|scope| {
            let sweeper = scope.spawn(|| store.sweep_at(Duration::minutes(30), later));
            let closed = ids
                .iter()
                .filter(|id| store.close(id.as_str(), COORD).is_ok())
                .count();
            let swept = sweeper.join().unwrap();
            // Exactly one path wins each session; the loser sees NotFound.
            assert_eq!(closed + swept, ids.len());
        });

        assert_eq!(store.counts().active, 0);
    }

    #[test]
    fn counts_track_lifecycle() {
        let store = store();
        let a = store.create("alice", "0xa1").unwrap();
        store.create("bob", "0xb2").unwrap();
        store.close(&a.session_id, "0xa1").unwrap();

        let counts = store.counts();
        assert_eq!(counts.active, 1);
        assert_eq!(counts.closed, 1);
        assert_eq!(counts.total, 2);
        assert_eq!(store.active_ids().len(), 1);
    }
}
