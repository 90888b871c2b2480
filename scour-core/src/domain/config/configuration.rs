// scour-core/src/domain/config/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Validated cleaning settings. Every field is optional so that sources can
/// be layered on top of each other.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Hooks>,
}

/// `extends: "./base.json"` or `extends: ["./a.json", "./b.json"]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    /// Entries in declaration order.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Extends::One(path) => vec![path.as_str()],
            Extends::Many(paths) => paths.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hooks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_clean: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_clean: Option<String>,
}

impl Configuration {
    pub fn extends_entries(&self) -> Vec<&str> {
        self.extends.as_ref().map(Extends::entries).unwrap_or_default()
    }

    pub fn pre_clean(&self) -> Option<&str> {
        self.hooks.as_ref().and_then(|h| h.pre_clean.as_deref())
    }

    pub fn post_clean(&self) -> Option<&str> {
        self.hooks.as_ref().and_then(|h| h.post_clean.as_deref())
    }
}

/// A merged configuration and the file it was (last) read from.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: Configuration,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filepath: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn new(config: Configuration, filepath: Option<PathBuf>) -> Self {
        Self { config, filepath }
    }
}
