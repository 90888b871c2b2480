// scour-core/src/domain/config/schema.rs

use serde_json::{Map, Value};
use std::fmt;

use super::configuration::{Configuration, Extends, Hooks};

/// One violated constraint, addressed by its field path (`targets[2]`,
/// `hooks.preClean`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

/// Every violation found in a document. Validation never stops at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaViolations {
    pub violations: Vec<Violation>,
}

impl SchemaViolations {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// One `- path: message` line per violation.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("- {}: {}", v.path, v.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Checks a parsed document against the configuration shape.
///
/// Unknown keys are tolerated, both at the top level and inside `hooks`.
pub fn validate(value: &Value) -> Result<Configuration, SchemaViolations> {
    let mut errors = SchemaViolations::default();

    let Some(object) = value.as_object() else {
        errors.push("(root)", format!("expected an object, found {}", kind(value)));
        return Err(errors);
    };

    let config = Configuration {
        targets: string_list(object, "targets", &mut errors),
        ignore: string_list(object, "ignore", &mut errors),
        extends: extends(object, &mut errors),
        hooks: hooks(object, &mut errors),
    };

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

fn string_list(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut SchemaViolations,
) -> Option<Vec<String>> {
    let value = object.get(field)?;
    let Some(items) = value.as_array() else {
        errors.push(
            field,
            format!("expected an array of strings, found {}", kind(value)),
        );
        return None;
    };
    collect_strings(items, field, errors)
}

fn collect_strings(
    items: &[Value],
    field: &str,
    errors: &mut SchemaViolations,
) -> Option<Vec<String>> {
    let mut out = Vec::with_capacity(items.len());
    let mut ok = true;
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                ok = false;
                errors.push(
                    format!("{field}[{i}]"),
                    format!("expected a string, found {}", kind(item)),
                );
            }
        }
    }
    ok.then_some(out)
}

fn extends(object: &Map<String, Value>, errors: &mut SchemaViolations) -> Option<Extends> {
    match object.get("extends")? {
        Value::String(path) => Some(Extends::One(path.clone())),
        Value::Array(items) => collect_strings(items, "extends", errors).map(Extends::Many),
        other => {
            errors.push(
                "extends",
                format!(
                    "expected a string or an array of strings, found {}",
                    kind(other)
                ),
            );
            None
        }
    }
}

fn hooks(object: &Map<String, Value>, errors: &mut SchemaViolations) -> Option<Hooks> {
    let value = object.get("hooks")?;
    let Some(hooks) = value.as_object() else {
        errors.push("hooks", format!("expected an object, found {}", kind(value)));
        return None;
    };

    let mut command = |key: &str| match hooks.get(key) {
        None => None,
        Some(Value::String(cmd)) => Some(cmd.clone()),
        Some(other) => {
            errors.push(
                format!("hooks.{key}"),
                format!("expected a string, found {}", kind(other)),
            );
            None
        }
    };

    Some(Hooks {
        pre_clean: command("preClean"),
        post_clean: command("postClean"),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
