//! Reference completion engine: keyword tables ranked by prefix match and
//! line-context affinity.

use serde::Serialize;

use crate::traits::CompletionEngine;

/// One ranked completion.
#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub text: String,
    pub score: u32,
}

const PY_WORDS: &[&str] = &[
    "import", "def", "class", "return", "yield", "lambda", "async", "await", "raise", "assert",
    "with", "from", "global", "nonlocal", "print", "range", "self",
];

const RS_WORDS: &[&str] = &[
    "fn", "let", "mut", "impl", "struct", "enum", "trait", "match", "return", "pub", "use", "mod",
    "async", "await", "self", "super", "where", "derive",
];

const JS_WORDS: &[&str] = &[
    "function", "const", "let", "var", "return", "class", "import", "export", "async", "await",
    "this", "new", "typeof", "instanceof",
];

const GENERIC_WORDS: &[&str] = &[
    "begin", "call", "define", "end", "function", "if", "loop", "return", "set", "then", "var",
    "while",
];

fn table_for(language: &str) -> &'static [&'static str] {
    match language {
        "py" | "python" => PY_WORDS,
        "rs" | "rust" => RS_WORDS,
        "js" | "javascript" | "ts" | "typescript" => JS_WORDS,
        _ => GENERIC_WORDS,
    }
}

/// Default completion engine. Candidates are the language keyword table
/// filtered by `prefix`; a candidate already present in `line_context`
/// outranks one that is not, shorter candidates outrank longer, ties break
/// alphabetically.
pub struct PrefixCompletionEngine;

impl CompletionEngine for PrefixCompletionEngine {
    fn complete(
        &self,
        prefix: &str,
        line_context: &str,
        language: &str,
        max_n: usize,
    ) -> Vec<Completion> {
        let mut ranked: Vec<Completion> = table_for(language)
            .iter()
            .filter(|word| word.starts_with(prefix) && !prefix.is_empty())
            .map(|word| {
                let context_bonus = if line_context.contains(word) { 50 } else { 0 };
                let brevity = 32u32.saturating_sub(word.len() as u32);
                Completion {
                    text: (*word).to_owned(),
                    score: context_bonus + brevity,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
        ranked.truncate(max_n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_prefix_filtered_and_capped() {
        let hits = PrefixCompletionEngine.complete("im", "", "py", 5);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|c| c.text.starts_with("im")));
        assert!(hits.len() <= 5);
    }

    #[test]
    fn empty_prefix_yields_nothing() {
        assert!(PrefixCompletionEngine.complete("", "let x", "rs", 5).is_empty());
    }

    #[test]
    fn context_mention_outranks() {
        let hits = PrefixCompletionEngine.complete("a", "await handle()", "rs", 10);
        assert_eq!(hits[0].text, "await");
    }

    #[test]
    fn unknown_language_falls_back_to_generic_table() {
        let hits = PrefixCompletionEngine.complete("fu", "", "cobol", 5);
        assert_eq!(hits[0].text, "function");
    }

    #[test]
    fn ranking_is_deterministic() {
        let a = PrefixCompletionEngine.complete("re", "return early", "rs", 10);
        let b = PrefixCompletionEngine.complete("re", "return early", "rs", 10);
        let texts = |v: &[Completion]| v.iter().map(|c| c.text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(&a), texts(&b));
    }

    #[test]
    fn max_n_zero_is_empty() {
        assert!(PrefixCompletionEngine.complete("re", "", "rs", 0).is_empty());
    }
}
