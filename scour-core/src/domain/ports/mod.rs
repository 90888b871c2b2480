// scour-core/src/domain/ports/mod.rs

pub mod config_source;

pub use config_source::{ConfigSource, RawConfig};
