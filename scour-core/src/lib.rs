// scour-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Domain (Cœur du métier)
// Configuration, règle de merge, schéma, réduction des chemins, ports.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 2. Infrastructure (Adapters)
// Fichiers de config, extends, cache, scan des cibles, suppression, processus.
pub mod infrastructure;

// 3. Application (Use Cases)
// Orchestration (Clean, Resolve config)
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use domain::config::{Configuration, LoadedConfig};
pub use domain::paths::deduplicate_paths;
pub use error::ScourError;
pub use infrastructure::config::{ConfigCache, ConfigLoader, LoadOptions};

/// Loads the merged configuration for a project with a fresh filesystem
/// source and the given cache.
pub async fn load_config(
    cache: std::sync::Arc<ConfigCache>,
    options: &LoadOptions,
) -> Result<LoadedConfig, ScourError> {
    let source = std::sync::Arc::new(infrastructure::config::FileConfigSource::new());
    ConfigLoader::new(source, cache).load_config(options).await
}
