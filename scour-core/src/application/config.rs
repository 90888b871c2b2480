// scour-core/src/application/config.rs

use serde::Serialize;
use tracing::instrument;

use crate::domain::config::{Configuration, LoadedConfig};
use crate::error::ScourError;
use crate::infrastructure::config::{ConfigLoader, LoadOptions};
use crate::infrastructure::scanner::DEFAULT_TARGETS;

/// A loaded configuration plus the patterns a clean would actually use.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(flatten)]
    pub loaded: LoadedConfig,
    pub effective_targets: Vec<String>,
    pub effective_ignore: Vec<String>,
}

#[instrument(skip(loader))]
pub async fn resolve_config(
    loader: &ConfigLoader,
    options: &LoadOptions,
) -> Result<ResolvedConfig, ScourError> {
    let loaded = loader.load_config(options).await?;
    let (effective_targets, effective_ignore) = effective_patterns(&loaded.config, &[], &[]);
    Ok(ResolvedConfig {
        loaded,
        effective_targets,
        effective_ignore,
    })
}

/// Target overrides replace the configured list; extra ignores are appended.
/// Falls back to [`DEFAULT_TARGETS`] when nothing sets targets.
pub fn effective_patterns(
    config: &Configuration,
    target_overrides: &[String],
    extra_ignore: &[String],
) -> (Vec<String>, Vec<String>) {
    let targets = if !target_overrides.is_empty() {
        target_overrides.to_vec()
    } else if let Some(configured) = &config.targets {
        configured.clone()
    } else {
        DEFAULT_TARGETS.iter().map(|s| s.to_string()).collect()
    };

    let mut ignore = config.ignore.clone().unwrap_or_default();
    ignore.extend(extra_ignore.iter().cloned());

    (targets, ignore)
}
