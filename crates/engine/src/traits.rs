//! Trait seams between the protocol core and the assistance engines.
//!
//! The platform holds each collaborator as `Arc<dyn …>`; tests swap in
//! instrumented implementations to observe exactly when the engines run.

use crate::complete::Completion;
use crate::suggest::{Suggestion, SuggestionKind};
use crate::validate::ValidationReport;

/// Code validation collaborator.
pub trait ValidationEngine: Send + Sync {
    /// Check `code` against the engine's rule set. Violations come back
    /// ordered by rule precedence.
    fn validate(&self, code: &str) -> ValidationReport;
}

/// Completion ranking collaborator.
pub trait CompletionEngine: Send + Sync {
    /// Rank completions for `prefix` as typed within `line_context`.
    /// Returns at most `max_n` entries, best first.
    fn complete(
        &self,
        prefix: &str,
        line_context: &str,
        language: &str,
        max_n: usize,
    ) -> Vec<Completion>;
}

/// Suggestion ranking collaborator.
pub trait SuggestionEngine: Send + Sync {
    /// Rank suggestions of `kind` for `query`. Returns at most `max_n`
    /// entries, best first.
    fn suggest(&self, query: &str, kind: SuggestionKind, max_n: usize) -> Vec<Suggestion>;
}
