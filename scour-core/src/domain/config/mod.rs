// scour-core/src/domain/config/mod.rs

pub mod configuration;
pub mod merge;
pub mod schema;

pub use configuration::{Configuration, Extends, Hooks, LoadedConfig};
pub use merge::merge;
pub use schema::{SchemaViolations, Violation, validate};
