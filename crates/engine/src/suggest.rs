//! Reference suggestion engine: a static per-kind catalog ranked by query
//! term overlap.

use serde::{Deserialize, Serialize};

use crate::traits::SuggestionEngine;

/// Fixed suggestion taxonomy. The wire form is the numeric discriminant;
/// anything outside `0..=3` is rejected at the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Refactor,
    Fix,
    Optimize,
    Document,
}

impl SuggestionKind {
    /// Decode the numeric wire value.
    pub fn from_wire(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::Refactor),
            1 => Some(Self::Fix),
            2 => Some(Self::Optimize),
            3 => Some(Self::Document),
            _ => None,
        }
    }

    /// Numeric wire value, the inverse of [`from_wire`](Self::from_wire).
    pub fn wire(&self) -> u64 {
        *self as u64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refactor => "refactor",
            Self::Fix => "fix",
            Self::Optimize => "optimize",
            Self::Document => "document",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Refactor, Self::Fix, Self::Optimize, Self::Document]
    }
}

/// One ranked suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub body: String,
    pub kind: SuggestionKind,
}

fn catalog(kind: SuggestionKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        SuggestionKind::Refactor => &[
            ("extract function", "pull the repeated block into a named function"),
            ("rename symbol", "give the variable a name that states its role"),
            ("inline temporary", "fold the single-use temporary into its use site"),
            ("split module", "move the unrelated helpers into their own module"),
        ],
        SuggestionKind::Fix => &[
            ("handle error path", "propagate the failure instead of ignoring it"),
            ("fix off-by-one", "check the loop bound against the last index"),
            ("close resource", "release the handle on every exit path"),
            ("guard null input", "reject the empty input before dereferencing"),
        ],
        SuggestionKind::Optimize => &[
            ("hoist invariant", "move the loop-invariant computation out of the loop"),
            ("reserve capacity", "size the collection once instead of growing it"),
            ("avoid copy", "borrow the buffer instead of cloning it"),
            ("batch requests", "coalesce the per-item calls into one batch"),
        ],
        SuggestionKind::Document => &[
            ("document contract", "state what the function requires and returns"),
            ("document invariant", "record the invariant the struct maintains"),
            ("add example", "show one canonical call with its output"),
            ("explain constant", "say where the magic number comes from"),
        ],
    }
}

/// Default suggestion engine. Entries whose title or body mention a query
/// term rank first; within equal relevance, catalog order holds.
pub struct CatalogSuggestionEngine;

impl SuggestionEngine for CatalogSuggestionEngine {
    fn suggest(&self, query: &str, kind: SuggestionKind, max_n: usize) -> Vec<Suggestion> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let mut ranked: Vec<(usize, Suggestion)> = catalog(kind)
            .iter()
            .map(|(title, body)| {
                let haystack = format!("{title} {body}");
                let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                (
                    matched,
                    Suggestion {
                        title: (*title).to_owned(),
                        body: (*body).to_owned(),
                        kind,
                    },
                )
            })
            .collect();

        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.into_iter().map(|(_, s)| s).take(max_n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_decoding_is_bounds_checked() {
        assert_eq!(SuggestionKind::from_wire(0), Some(SuggestionKind::Refactor));
        assert_eq!(SuggestionKind::from_wire(3), Some(SuggestionKind::Document));
        assert_eq!(SuggestionKind::from_wire(4), None);
        assert_eq!(SuggestionKind::from_wire(99), None);
    }

    #[test]
    fn matching_entries_rank_first() {
        let hits = CatalogSuggestionEngine.suggest("fix the loop", SuggestionKind::Fix, 4);
        assert_eq!(hits[0].title, "fix off-by-one");
    }

    #[test]
    fn results_are_capped_and_kind_tagged() {
        let hits = CatalogSuggestionEngine.suggest("anything", SuggestionKind::Optimize, 2);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|s| s.kind == SuggestionKind::Optimize));
    }

    #[test]
    fn no_match_keeps_catalog_order() {
        let hits = CatalogSuggestionEngine.suggest("zzz", SuggestionKind::Document, 4);
        assert_eq!(hits[0].title, "document contract");
        assert_eq!(hits.len(), 4);
    }
}
