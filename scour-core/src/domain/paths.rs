// scour-core/src/domain/paths.rs

use serde_json::Value;

use crate::domain::error::DomainError;

/// Collapses candidate paths into the minimal set of top-level targets.
///
/// Backslashes are normalised to `/` and trailing separators dropped. Shorter
/// paths are considered first, and a path is kept only if it neither equals
/// nor lies beneath an already kept path. Containment is separator-bounded:
/// `ab` does not swallow `abc`.
pub fn deduplicate_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = paths.iter().map(|p| normalize(p.as_ref())).collect();
    normalized.sort_by_key(String::len);

    let mut kept: Vec<String> = Vec::new();
    for path in normalized {
        let covered = kept.iter().any(|parent| is_within(&path, parent));
        if !covered {
            kept.push(path);
        }
    }
    kept
}

/// Same as [`deduplicate_paths`] for untyped input (e.g. a JSON payload).
pub fn deduplicate_paths_value(value: &Value) -> Result<Vec<String>, DomainError> {
    let Some(items) = value.as_array() else {
        return Err(DomainError::InvalidPathsInput(
            "expected an array of strings".to_string(),
        ));
    };

    let mut paths = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => paths.push(s),
            None => {
                return Err(DomainError::InvalidPathsInput(format!(
                    "element {i} is not a string"
                )));
            }
        }
    }
    Ok(deduplicate_paths(&paths))
}

fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim_end_matches('/');
    if trimmed.is_empty() && !unified.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_within(path: &str, parent: &str) -> bool {
    if path == parent {
        return true;
    }
    if parent == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with('/'))
}
