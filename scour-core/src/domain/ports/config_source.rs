// scour-core/src/domain/ports/config_source.rs

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ScourError;

/// A parsed but not yet validated configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig {
    pub config: Value,
    pub filepath: PathBuf,
}

/// Where configuration documents come from. The loader only talks to this
/// trait, so tests and embedders can swap the filesystem out.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Searches `start_dir` and its ancestors for a recognised config file.
    /// `None` when nothing is found or the file found is empty.
    async fn search(&self, start_dir: &Path) -> Result<Option<RawConfig>, ScourError>;

    /// Parses one file. `None` when the content is not a configuration.
    async fn load_file(&self, path: &Path) -> Result<Option<RawConfig>, ScourError>;

    /// Reads the configuration field of the package manifest in `project_root`.
    async fn load_manifest(&self, project_root: &Path) -> Result<Option<RawConfig>, ScourError>;

    async fn exists(&self, path: &Path) -> bool;
}
