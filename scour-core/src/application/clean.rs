// scour-core/src/application/clean.rs

use futures::future::join_all;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::application::config::effective_patterns;
use crate::error::ScourError;
use crate::infrastructure::config::{ConfigLoader, LoadOptions};
use crate::infrastructure::fs::{RetryPolicy, path_size, remove_with_retry};
use crate::infrastructure::process::{PackageManager, run_hook};
use crate::infrastructure::scanner::{ScannedTarget, TargetKind, TargetScanner};

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub load: LoadOptions,
    /// Only report what would be deleted.
    pub dry_run: bool,
    /// The caller has confirmed deletion. Without it nothing is deleted.
    pub confirmed: bool,
    /// Replaces the configured `targets` when non-empty.
    pub targets: Vec<String>,
    /// Appended to the configured `ignore`.
    pub ignore: Vec<String>,
    pub skip_hooks: bool,
    pub reinstall: bool,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    DryRun,
    /// Deletion was not confirmed; the plan is returned untouched.
    Unconfirmed,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    Planned,
    Deleted { attempts: u32 },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTarget {
    pub relative: String,
    pub path: PathBuf,
    pub kind: TargetKind,
    pub size: u64,
    pub outcome: TargetOutcome,
}

#[derive(Debug, Clone)]
pub struct CleanReport {
    pub project_root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub mode: CleanMode,
    pub targets: Vec<CleanTarget>,
    pub reinstalled: Option<PackageManager>,
    /// Steps that failed once deletion had started (postClean, reinstall).
    pub post_errors: Vec<String>,
}

impl CleanReport {
    pub fn total_size(&self) -> u64 {
        self.targets.iter().map(|t| t.size).sum()
    }

    pub fn freed(&self) -> u64 {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::Deleted { .. }))
            .map(|t| t.size)
            .sum()
    }

    pub fn failures(&self) -> Vec<&CleanTarget> {
        self.targets
            .iter()
            .filter(|t| matches!(t.outcome, TargetOutcome::Failed(_)))
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.failures().is_empty() && self.post_errors.is_empty()
    }
}

#[instrument(skip(loader, options), fields(project_root = ?options.load.project_root))]
pub async fn clean_project(
    loader: &ConfigLoader,
    options: &CleanOptions,
) -> Result<CleanReport, ScourError> {
    info!("🧹 Initializing cleanup sequence...");

    let loaded = loader.load_config(&options.load).await?;
    let root = options.load.project_root.clone();
    let (targets, ignore) = effective_patterns(&loaded.config, &options.targets, &options.ignore);

    let scanner = TargetScanner::new(root.clone(), &targets, &ignore)?;
    let scanned = tokio::task::spawn_blocking(move || scanner.scan())
        .await
        .map_err(|e| ScourError::InternalError(format!("scan task failed: {e}")))?;

    let mode = if options.dry_run {
        CleanMode::DryRun
    } else if !options.confirmed {
        CleanMode::Unconfirmed
    } else {
        CleanMode::Delete
    };

    let mut report = CleanReport {
        project_root: root.clone(),
        config_file: loaded.filepath.clone(),
        mode,
        targets: measure(scanned).await,
        reinstalled: None,
        post_errors: Vec::new(),
    };
    info!(count = report.targets.len(), bytes = report.total_size(), ?mode, "Targets resolved");

    if mode != CleanMode::Delete {
        return Ok(report);
    }

    // Detected before deletion: a lockfile may itself be a target
    let package_manager = if options.reinstall {
        PackageManager::detect(&root)
    } else {
        None
    };

    if !options.skip_hooks {
        if let Some(command) = loaded.config.pre_clean() {
            run_hook("preClean", command, &root).await?;
        }
    }

    for target in &mut report.targets {
        target.outcome = match remove_with_retry(&target.path, options.retry).await {
            Ok(attempts) => {
                info!(path = %target.relative, "🗑️  Artifact removed");
                TargetOutcome::Deleted { attempts }
            }
            Err(e) => {
                warn!(path = %target.relative, error = %e, "Artifact could not be removed");
                TargetOutcome::Failed(e.to_string())
            }
        };
    }

    // Failures past this point are recorded on the report, not returned
    if !options.skip_hooks {
        if let Some(command) = loaded.config.post_clean() {
            if let Err(e) = run_hook("postClean", command, &root).await {
                warn!(error = %e, "postClean hook failed");
                report.post_errors.push(e.to_string());
            }
        }
    }

    if options.reinstall {
        match package_manager {
            Some(pm) => match pm.reinstall(&root).await {
                Ok(()) => report.reinstalled = Some(pm),
                Err(e) => {
                    warn!(error = %e, "Reinstall failed");
                    report.post_errors.push(e.to_string());
                }
            },
            None => warn!("No package manager detected, skipping reinstall"),
        }
    }

    Ok(report)
}

/// Sizes every target concurrently on the blocking pool.
async fn measure(scanned: Vec<ScannedTarget>) -> Vec<CleanTarget> {
    let jobs = scanned.into_iter().map(|target| async move {
        let path = target.path.clone();
        let size = match tokio::task::spawn_blocking(move || path_size(&path)).await {
            Ok(Ok(size)) => size,
            Ok(Err(e)) => {
                warn!(path = %target.relative, error = %e, "Could not size target");
                0
            }
            Err(e) => {
                warn!(path = %target.relative, error = %e, "Sizing task failed");
                0
            }
        };
        CleanTarget {
            relative: target.relative,
            path: target.path,
            kind: target.kind,
            size,
            outcome: TargetOutcome::Planned,
        }
    });
    join_all(jobs).await
}
