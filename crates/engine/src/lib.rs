//! Engine collaborators for the AriVa protocol core.
//!
//! The platform consumes code validation, completion ranking, and
//! suggestion ranking through the trait seams in [`traits`]. The bundled
//! implementations are small deterministic rule tables (no clock, no
//! randomness), so simulations and tests reproduce exactly. Address
//! derivation for caller and coordinator identities lives in [`identity`].

pub mod complete;
pub mod identity;
pub mod suggest;
pub mod traits;
pub mod validate;

pub use complete::{Completion, PrefixCompletionEngine};
pub use identity::AddressBook;
pub use suggest::{CatalogSuggestionEngine, Suggestion, SuggestionKind};
pub use traits::{CompletionEngine, SuggestionEngine, ValidationEngine};
pub use validate::{RuleValidationEngine, RuleViolation, ValidationReport};
