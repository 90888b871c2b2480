// scour-core/src/infrastructure/config/source.rs

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument, warn};

use crate::domain::ports::{ConfigSource, RawConfig};
use crate::error::ScourError;
use crate::infrastructure::error::InfrastructureError;

/// File names looked up in every directory during discovery, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 7] = [
    ".scourrc",
    ".scourrc.json",
    ".scourrc.yaml",
    ".scourrc.yml",
    "scour.config.json",
    "scour.config.yaml",
    "scour.config.yml",
];

/// Key holding the configuration inside `package.json`, and the table name
/// under `[package.metadata]` / `[workspace.metadata]` in `Cargo.toml`.
pub const MANIFEST_FIELD: &str = "scour";

/// Filesystem-backed [`ConfigSource`].
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    /// Upward discovery stops after this directory.
    stop_dir: Option<PathBuf>,
}

impl Default for FileConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigSource {
    /// Discovery stops at the user's home directory (or the filesystem root).
    pub fn new() -> Self {
        Self {
            stop_dir: home_dir(),
        }
    }

    pub fn with_stop_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stop_dir = Some(dir.into());
        self
    }

    async fn load_package_json(&self, project_root: &Path) -> Option<RawConfig> {
        let path = project_root.join("package.json");
        let content = read_if_exists(&path).await?;

        let manifest: Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping unparseable package.json");
                return None;
            }
        };

        manifest.get(MANIFEST_FIELD).map(|config| RawConfig {
            config: config.clone(),
            filepath: path,
        })
    }

    async fn load_cargo_toml(&self, project_root: &Path) -> Option<RawConfig> {
        let path = project_root.join("Cargo.toml");
        let content = read_if_exists(&path).await?;

        let manifest: toml::Value = match toml::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping unparseable Cargo.toml");
                return None;
            }
        };

        let section = ["package", "workspace"].into_iter().find_map(|table| {
            manifest
                .get(table)
                .and_then(|t| t.get("metadata"))
                .and_then(|m| m.get(MANIFEST_FIELD))
        })?;

        match serde_json::to_value(section) {
            Ok(config) => Some(RawConfig {
                config,
                filepath: path,
            }),
            Err(e) => {
                warn!(path = ?path, error = %e, "Skipping Cargo.toml metadata");
                None
            }
        }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    #[instrument(skip(self))]
    async fn search(&self, start_dir: &Path) -> Result<Option<RawConfig>, ScourError> {
        let start = std::path::absolute(start_dir)?;
        let mut current: Option<&Path> = Some(start.as_path());

        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if !fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                    continue;
                }

                debug!(path = ?candidate, "Found configuration file");
                let content = fs::read_to_string(&candidate).await?;
                if content.trim().is_empty() {
                    return Ok(None);
                }

                let config = parse_document(&candidate, &content)?;
                if config.is_null() {
                    return Ok(None);
                }
                return Ok(Some(RawConfig {
                    config,
                    filepath: candidate,
                }));
            }

            if self.stop_dir.as_deref() == Some(dir) {
                break;
            }
            current = dir.parent();
        }

        Ok(None)
    }

    #[instrument(skip(self))]
    async fn load_file(&self, path: &Path) -> Result<Option<RawConfig>, ScourError> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Blank, comment-only and `~` documents all load as an empty object
        let config = if content.trim().is_empty() {
            Value::Null
        } else {
            match parse_document(path, &content) {
                Ok(config) => config,
                Err(error) => {
                    warn!(%error, "Configuration file could not be parsed");
                    return Ok(None);
                }
            }
        };

        Ok(Some(RawConfig {
            config: match config {
                Value::Null => Value::Object(Default::default()),
                other => other,
            },
            filepath: path.to_path_buf(),
        }))
    }

    #[instrument(skip(self))]
    async fn load_manifest(&self, project_root: &Path) -> Result<Option<RawConfig>, ScourError> {
        if let Some(raw) = self.load_package_json(project_root).await {
            return Ok(Some(raw));
        }
        Ok(self.load_cargo_toml(project_root).await)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}

/// `.json` files are strict JSON, everything else is YAML (a JSON superset).
fn parse_document(path: &Path, content: &str) -> Result<Value, InfrastructureError> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        serde_json::from_str(content).map_err(|source| InfrastructureError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(content).map_err(|source| InfrastructureError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

async fn read_if_exists(path: &Path) -> Option<String> {
    match fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = ?path, error = %e, "Failed to read manifest");
            None
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
