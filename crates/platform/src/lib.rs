//! The AriVa platform: session-backed request dispatch for the code
//! assistance engine.
//!
//! A [`Platform`] handle owns the session store, the engine collaborators,
//! the identity book, and the handle-scoped counters. Callers drive
//! everything through [`handle_request`], which validates parameters,
//! routes to the capability handler, and normalizes the outcome into the
//! uniform envelope. [`simulation`] provides the synthetic workloads used
//! as smoke tests and load-shape references.

pub mod dispatch;
pub mod health;
pub mod platform;
pub mod simulation;

pub use dispatch::{dispatch, handle_request};
pub use health::{health_check, run_demo};
pub use platform::{create_platform, Platform, PlatformStats};
pub use simulation::{run_simulation, run_simulation_v2, SimulationReport};

// Re-exported so embedders and integration tests reach the whole surface
// through this crate alone.
pub use ariva_domain::{Error, PlatformConfig, Result};
pub use ariva_engine::{
    Completion, CompletionEngine, Suggestion, SuggestionEngine, SuggestionKind, ValidationEngine,
    ValidationReport,
};
pub use ariva_protocol::{list_methods, request_templates};
pub use ariva_sessions::{Session, SessionStatus, SessionStore};
