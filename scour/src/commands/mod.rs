// scour/src/commands/mod.rs

pub mod clean;
pub mod config;
pub mod dedupe;

use std::path::{Path, PathBuf};

use anyhow::Context;
use scour_core::LoadOptions;

use crate::cli::ProjectArgs;

/// Absolute project root plus the optional global file, as the loader expects them.
pub(crate) fn load_options(project: &ProjectArgs) -> anyhow::Result<LoadOptions> {
    let root = absolute(&project.project_dir)?;
    if !root.is_dir() {
        anyhow::bail!("Project directory not found: {}", root.display());
    }
    let global = project.global_config.as_deref().map(absolute).transpose()?;
    Ok(LoadOptions::new(root).with_global_config(global))
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Cannot resolve path {:?}", path))
}
