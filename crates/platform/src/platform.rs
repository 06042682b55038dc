use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{json, Value};

use ariva_domain::config::PlatformConfig;
use ariva_engine::{
    AddressBook, CatalogSuggestionEngine, CompletionEngine, PrefixCompletionEngine,
    RuleValidationEngine, SuggestionEngine, SuggestionKind, ValidationEngine,
};
use ariva_protocol::methods::METHODS;
use ariva_sessions::SessionStore;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Stats
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Aggregate counters, one set per handle. Updated by the handlers as they
/// run, never recomputed from history.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PlatformStats {
    pub requests_total: u64,
    pub requests_failed: u64,
    pub sessions_created: u64,
    pub sessions_closed: u64,
    pub sessions_swept: u64,
    pub validations_run: u64,
    pub completions_served: u64,
    pub suggestions_served: u64,
    pub context_updates: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Platform handle
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The owning instance of engine state: session store, engine
/// collaborators, identity book, and counters.
///
/// One handle per embedding surface, passed explicitly to every dispatch —
/// no process-global state. Tests construct as many independent handles as
/// they need.
pub struct Platform {
    config: PlatformConfig,
    coordinator: String,
    store: SessionStore,
    identities: AddressBook,
    validation: Arc<dyn ValidationEngine>,
    completion: Arc<dyn CompletionEngine>,
    suggestion: Arc<dyn SuggestionEngine>,
    stats: RwLock<PlatformStats>,
}

impl Platform {
    /// Build a handle with the reference engines. The coordinator address
    /// is the first identity issued from the configured namespace.
    pub fn new(config: PlatformConfig) -> Self {
        let identities = AddressBook::new(config.namespace.clone());
        let coordinator = identities.issue("coordinator");
        let store = SessionStore::new(coordinator.clone(), config.max_sessions);

        tracing::info!(
            namespace = %config.namespace,
            max_sessions = config.max_sessions,
            coordinator = %coordinator,
            "platform handle created"
        );
        Self {
            config,
            coordinator,
            store,
            identities,
            validation: Arc::new(RuleValidationEngine),
            completion: Arc::new(PrefixCompletionEngine),
            suggestion: Arc::new(CatalogSuggestionEngine),
            stats: RwLock::new(PlatformStats::default()),
        }
    }

    /// Swap the engine collaborators. Test seam; the protocol surface is
    /// unchanged by whatever sits behind the traits.
    pub fn with_engines(
        mut self,
        validation: Arc<dyn ValidationEngine>,
        completion: Arc<dyn CompletionEngine>,
        suggestion: Arc<dyn SuggestionEngine>,
    ) -> Self {
        self.validation = validation;
        self.completion = completion;
        self.suggestion = suggestion;
        self
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// The administrative identity authorized on every session of this
    /// handle.
    pub fn coordinator(&self) -> &str {
        &self.coordinator
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn validation(&self) -> &dyn ValidationEngine {
        self.validation.as_ref()
    }

    pub fn completion(&self) -> &dyn CompletionEngine {
        self.completion.as_ref()
    }

    pub fn suggestion(&self) -> &dyn SuggestionEngine {
        self.suggestion.as_ref()
    }

    /// Issue a fresh caller address from the handle's namespace.
    pub fn issue_caller(&self, label: &str) -> String {
        self.identities.issue(label)
    }

    /// True when no two addresses issued by this handle collide.
    pub fn confirm_addresses_unique(&self) -> bool {
        self.identities.confirm_addresses_unique()
    }

    /// True when the hex re-encodings of all issued addresses are unique.
    pub fn confirm_hex_unique(&self) -> bool {
        self.identities.confirm_hex_unique()
    }

    /// Snapshot of the handle's counters.
    pub fn stats(&self) -> PlatformStats {
        *self.stats.read()
    }

    pub(crate) fn record(&self, update: impl FnOnce(&mut PlatformStats)) {
        update(&mut self.stats.write());
    }

    /// Protocol constants: registry size and names, the suggestion kind
    /// enumeration, and the effective defaults.
    pub fn constants(&self) -> Value {
        let kinds: Vec<Value> = SuggestionKind::all()
            .iter()
            .map(|k| json!({ "wire": k.wire(), "name": k.as_str() }))
            .collect();
        json!({
            "methods": METHODS.iter().map(|m| m.name).collect::<Vec<_>>(),
            "method_count": METHODS.len(),
            "suggestion_kinds": kinds,
            "namespace": self.config.namespace,
            "coordinator": self.coordinator,
            "defaults": PlatformConfig::default(),
        })
    }
}

/// Build a platform handle with default configuration.
pub fn create_platform() -> Platform {
    Platform::new(PlatformConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_independent() {
        let a = create_platform();
        let b = create_platform();
        a.store().create("alice", "0xa1").unwrap();
        assert_eq!(a.store().counts().total, 1);
        assert_eq!(b.store().counts().total, 0);
    }

    #[test]
    fn coordinator_is_stable_per_namespace() {
        let a = create_platform();
        let b = create_platform();
        // First identity from the same namespace: same derivation.
        assert_eq!(a.coordinator(), b.coordinator());
        assert!(a.coordinator().starts_with("0x"));
    }

    #[test]
    fn issued_callers_never_collide() {
        let platform = create_platform();
        for i in 0..32 {
            platform.issue_caller(&format!("user-{i}"));
        }
        assert!(platform.confirm_addresses_unique());
        assert!(platform.confirm_hex_unique());
    }

    #[test]
    fn constants_expose_registry_and_kinds() {
        let platform = create_platform();
        let constants = platform.constants();
        assert_eq!(constants["method_count"], 10);
        assert_eq!(constants["suggestion_kinds"].as_array().unwrap().len(), 4);
        assert_eq!(constants["coordinator"], platform.coordinator());
    }
}
