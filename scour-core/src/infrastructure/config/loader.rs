// scour-core/src/infrastructure/config/loader.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::config::{Configuration, LoadedConfig, merge, validate};
use crate::domain::error::{ConfigScope, DomainError};
use crate::domain::ports::{ConfigSource, RawConfig};
use crate::error::ScourError;
use crate::infrastructure::config::cache::ConfigCache;
use crate::infrastructure::config::extends::ExtendsResolver;
use crate::infrastructure::config::source::FileConfigSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub project_root: PathBuf,
    pub global_config_path: Option<PathBuf>,
}

impl LoadOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            global_config_path: None,
        }
    }

    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config_path = path;
        self
    }
}

/// Discovers, validates, resolves and merges every configuration source for a
/// project. Precedence, lowest first: global file, workspace file, package
/// manifest.
pub struct ConfigLoader {
    source: Arc<dyn ConfigSource>,
    cache: Arc<ConfigCache>,
}

impl ConfigLoader {
    pub fn new(source: Arc<dyn ConfigSource>, cache: Arc<ConfigCache>) -> Self {
        Self { source, cache }
    }

    /// Filesystem source and a private cache.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(FileConfigSource::new()),
            Arc::new(ConfigCache::new()),
        )
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    #[instrument(skip(self, options), fields(project_root = ?options.project_root))]
    pub async fn load_config(&self, options: &LoadOptions) -> Result<LoadedConfig, ScourError> {
        let root = options.project_root.as_path();
        let global = options.global_config_path.as_deref();

        if let Some(hit) = self.cache.get(root, global) {
            debug!("Config cache hit");
            return Ok(hit);
        }

        let resolver = ExtendsResolver::new(self.source.as_ref());
        let mut candidates: Vec<LoadedConfig> = Vec::with_capacity(3);

        // 1. Global
        if let Some(global_path) = global {
            if self.source.exists(global_path).await {
                match self.source.load_file(global_path).await? {
                    Some(raw) => {
                        let config = validated(&raw, ConfigScope::Root)?;
                        let base_dir = raw.filepath.parent().unwrap_or(root).to_path_buf();
                        let resolved = resolver.resolve(config, &base_dir).await?;
                        debug!(path = ?raw.filepath, "Loaded global configuration");
                        candidates.push(LoadedConfig::new(resolved, Some(raw.filepath)));
                    }
                    None => warn!(path = ?global_path, "Global configuration could not be parsed, skipping"),
                }
            } else {
                debug!(path = ?global_path, "Global configuration not found");
            }
        }

        // 2. Workspace
        if let Some(raw) = self.source.search(root).await? {
            let config = validated(&raw, ConfigScope::Root)?;
            let resolved = resolver.resolve(config, root).await?;
            debug!(path = ?raw.filepath, "Loaded workspace configuration");
            candidates.push(LoadedConfig::new(resolved, Some(raw.filepath)));
        }

        // 3. Package manifest
        if let Some(raw) = self.source.load_manifest(root).await? {
            let config = validated(&raw, ConfigScope::Manifest)?;
            let resolved = resolver.resolve(config, root).await?;
            debug!(path = ?raw.filepath, "Loaded package manifest configuration");
            candidates.push(LoadedConfig::new(resolved, None));
        }

        let loaded = fold_candidates(candidates);
        self.cache.set(root, loaded.clone(), global);

        info!(
            filepath = ?loaded.filepath,
            targets = loaded.config.targets.as_ref().map_or(0, Vec::len),
            "Configuration loaded"
        );
        Ok(loaded)
    }
}

/// Merges candidates left to right; the filepath is the last one provided.
fn fold_candidates(candidates: Vec<LoadedConfig>) -> LoadedConfig {
    candidates
        .into_iter()
        .fold(LoadedConfig::default(), |acc, next| LoadedConfig {
            config: merge(&acc.config, &next.config),
            filepath: next.filepath.or(acc.filepath),
        })
}

fn validated(raw: &RawConfig, scope: ConfigScope) -> Result<Configuration, DomainError> {
    validate(&raw.config).map_err(|violations| DomainError::SchemaViolation {
        scope,
        file: display(&raw.filepath),
        summary: violations.summary(),
    })
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
