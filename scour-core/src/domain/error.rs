// scour-core/src/domain/error.rs

use miette::Diagnostic;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which kind of configuration document failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// A global or workspace configuration file.
    Root,
    /// The configuration field of a package manifest.
    Manifest,
    /// A file pulled in through `extends`.
    Extends,
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Root => write!(f, "configuration"),
            ConfigScope::Manifest => write!(f, "package manifest configuration"),
            ConfigScope::Extends => write!(f, "extends configuration"),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid {scope} in '{file}':\n{summary}")]
    #[diagnostic(
        code(scour::domain::schema),
        help("`targets` and `ignore` must be string arrays, `extends` a string or string array, `hooks` an object of strings.")
    )]
    SchemaViolation {
        scope: ConfigScope,
        file: String,
        summary: String,
    },

    #[error("Circular extends detected: '{}' was already visited", .0.display())]
    #[diagnostic(
        code(scour::domain::extends_cycle),
        help("Each file may appear only once in an extends chain.")
    )]
    ExtendsCycle(PathBuf),

    #[error("Invalid paths input: {0}")]
    #[diagnostic(code(scour::domain::paths_input))]
    InvalidPathsInput(String),
}
