//! Reference validation engine: a fixed, ordered rule table over raw text.

use serde::Serialize;

use crate::traits::ValidationEngine;

/// One rule violation, in rule-precedence order within a report.
#[derive(Debug, Clone, Serialize)]
pub struct RuleViolation {
    pub rule: String,
    pub message: String,
}

/// Outcome of a validation pass. `valid` holds exactly when `errors` is
/// empty.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<RuleViolation>,
}

const MAX_LINE_LEN: usize = 200;

/// Default validation engine. Rules run in a fixed order and each appends
/// at most one violation, so reports are deterministic per input.
pub struct RuleValidationEngine;

impl ValidationEngine for RuleValidationEngine {
    fn validate(&self, code: &str) -> ValidationReport {
        let mut errors = Vec::new();

        if code.trim().is_empty() {
            errors.push(RuleViolation {
                rule: "empty-source".into(),
                message: "source text is empty".into(),
            });
        }

        if let Some(found) = first_unbalanced(code) {
            errors.push(RuleViolation {
                rule: "unbalanced-delimiters".into(),
                message: format!("unbalanced delimiter `{found}`"),
            });
        }

        if let Some(n) = code
            .lines()
            .position(|line| line.chars().count() > MAX_LINE_LEN)
        {
            errors.push(RuleViolation {
                rule: "line-too-long".into(),
                message: format!("line {} exceeds {MAX_LINE_LEN} characters", n + 1),
            });
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Return the first delimiter that closes nothing or is never closed.
fn first_unbalanced(code: &str) -> Option<char> {
    let mut stack = Vec::new();
    for c in code.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Some(c);
                }
            }
            _ => {}
        }
    }
    stack.pop()
}
