// scour-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(scour::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG FILES ---
    #[error("Invalid JSON in '{}': {source}", .path.display())]
    #[diagnostic(code(scour::infra::json))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in '{}': {source}", .path.display())]
    #[diagnostic(
        code(scour::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Extended configuration not found: '{}'", .0.display())]
    #[diagnostic(
        code(scour::infra::extends_not_found),
        help("`extends` paths are resolved relative to the file that declares them.")
    )]
    ExtendsNotFound(PathBuf),

    #[error("Failed to load extended configuration: '{}'", .0.display())]
    #[diagnostic(code(scour::infra::extends_load))]
    ExtendsLoadFailure(PathBuf),

    // --- TARGETS ---
    #[error("Invalid glob pattern '{pattern}': {source}")]
    #[diagnostic(code(scour::infra::glob))]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to delete '{}' after {attempts} attempt(s): {source}", .path.display())]
    #[diagnostic(
        code(scour::infra::delete),
        help("Another process may hold the file open, or permissions may be missing.")
    )]
    DeleteFailed {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    // --- PROCESSES ---
    #[error("Failed to spawn '{command}': {source}")]
    #[diagnostic(code(scour::infra::spawn))]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Hook '{hook}' failed with exit code {code:?}")]
    #[diagnostic(code(scour::infra::hook))]
    HookFailed { hook: String, code: Option<i32> },

    #[error("Dependency reinstall '{command}' failed with exit code {code:?}")]
    #[diagnostic(code(scour::infra::reinstall))]
    ReinstallFailed { command: String, code: Option<i32> },
}
