//! The fixed method registry.
//!
//! Dispatch resolves method names against this table; anything absent is an
//! `UnknownMethod`. The table also drives required-parameter validation and
//! the request templates callers can start from.

use serde_json::{json, Map, Value};

/// Static description of one registry method.
#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    pub name: &'static str,
    /// Required parameters, in validation order.
    pub required: &'static [&'static str],
}

pub const METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "create_session",
        required: &["user_ref", "caller"],
    },
    MethodSpec {
        name: "get_session",
        required: &["session_id"],
    },
    MethodSpec {
        name: "close_session",
        required: &["session_id", "caller"],
    },
    MethodSpec {
        name: "validate_code",
        required: &["code"],
    },
    MethodSpec {
        name: "get_completions",
        required: &["session_id", "prefix", "line_context", "language", "max_n"],
    },
    MethodSpec {
        name: "get_suggestions",
        required: &["session_id", "query", "kind", "max_n"],
    },
    MethodSpec {
        name: "update_context",
        required: &["session_id", "context", "caller"],
    },
    MethodSpec {
        name: "stats",
        required: &[],
    },
    MethodSpec {
        name: "config",
        required: &[],
    },
    MethodSpec {
        name: "cleanup_stale",
        required: &[],
    },
];

/// Look up a method by name.
pub fn method_spec(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().find(|m| m.name == name)
}

/// Names of every registered method, in registry order.
pub fn list_methods() -> Vec<&'static str> {
    METHODS.iter().map(|m| m.name).collect()
}

/// Per-method parameter templates: every required parameter with a
/// placeholder value of the expected shape.
pub fn request_templates() -> Value {
    let mut templates = Map::new();
    for method in METHODS {
        let mut params = Map::new();
        for field in method.required {
            params.insert((*field).to_owned(), placeholder_for(field));
        }
        templates.insert(method.name.to_owned(), Value::Object(params));
    }
    Value::Object(templates)
}

fn placeholder_for(field: &str) -> Value {
    match field {
        "session_id" => json!("<session-id>"),
        "user_ref" => json!("<user-ref>"),
        "caller" => json!("0x<address>"),
        "code" => json!("<source-text>"),
        "prefix" => json!("<prefix>"),
        "line_context" => json!("<line-context>"),
        "language" => json!("py"),
        "query" => json!("<query>"),
        "context" => json!("<context>"),
        "kind" => json!(0),
        "max_n" => json!(5),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_the_ten_methods() {
        assert_eq!(METHODS.len(), 10);
        assert!(method_spec("create_session").is_some());
        assert!(method_spec("cleanup_stale").is_some());
        assert!(method_spec("interactive").is_none());
    }

    #[test]
    fn list_matches_registry_order() {
        let names = list_methods();
        assert_eq!(names.first(), Some(&"create_session"));
        assert_eq!(names.last(), Some(&"cleanup_stale"));
    }

    #[test]
    fn templates_cover_every_required_param() {
        let templates = request_templates();
        for method in METHODS {
            let params = templates[method.name].as_object().unwrap();
            assert_eq!(params.len(), method.required.len(), "{}", method.name);
            for field in method.required {
                assert!(!params[*field].is_null(), "{}: {field}", method.name);
            }
        }
    }

    #[test]
    fn numeric_params_template_as_numbers() {
        let templates = request_templates();
        assert!(templates["get_suggestions"]["kind"].is_u64());
        assert!(templates["get_completions"]["max_n"].is_u64());
    }
}
