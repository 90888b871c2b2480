pub mod config;
pub mod error;
pub mod paths;
pub mod ports;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::{ConfigScope, DomainError};
pub use paths::{deduplicate_paths, deduplicate_paths_value};
