// scour-core/src/application/mod.rs

pub mod clean;
pub mod config;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use scour_core::application::{clean_project, resolve_config};`
// sans avoir à connaître la structure interne des fichiers.

pub use clean::{CleanMode, CleanOptions, CleanReport, CleanTarget, TargetOutcome, clean_project};
pub use config::{ResolvedConfig, effective_patterns, resolve_config};
