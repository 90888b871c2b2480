// scour-core/src/infrastructure/process.rs

use std::fmt;
use std::path::Path;
use tokio::process::Command;
use tracing::{info, instrument};

use crate::infrastructure::error::InfrastructureError;

/// Runs a configured hook through the platform shell in `cwd`.
#[instrument(skip(command))]
pub async fn run_hook(hook: &str, command: &str, cwd: &Path) -> Result<(), InfrastructureError> {
    info!(%command, "Running hook");

    let status = shell(command)
        .current_dir(cwd)
        .status()
        .await
        .map_err(|source| InfrastructureError::CommandSpawn {
            command: command.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(InfrastructureError::HookFailed {
            hook: hook.to_string(),
            code: status.code(),
        });
    }
    Ok(())
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Bun,
    Npm,
    Cargo,
}

impl PackageManager {
    /// Picks the manager from the lockfiles (then manifests) in `project_root`.
    pub fn detect(project_root: &Path) -> Option<Self> {
        const MARKERS: [(&str, PackageManager); 8] = [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
            ("Cargo.lock", PackageManager::Cargo),
            ("package.json", PackageManager::Npm),
            ("Cargo.toml", PackageManager::Cargo),
        ];

        MARKERS
            .iter()
            .find(|(file, _)| project_root.join(file).is_file())
            .map(|(_, pm)| *pm)
    }

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
            PackageManager::Npm => "npm",
            PackageManager::Cargo => "cargo",
        }
    }

    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Cargo => &["fetch"],
            _ => &["install"],
        }
    }

    /// Re-downloads dependencies in `cwd`.
    #[instrument(skip(self), fields(manager = %self))]
    pub async fn reinstall(&self, cwd: &Path) -> Result<(), InfrastructureError> {
        info!("Reinstalling dependencies");

        let status = Command::new(self.program())
            .args(self.install_args())
            .current_dir(cwd)
            .status()
            .await
            .map_err(|source| InfrastructureError::CommandSpawn {
                command: self.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(InfrastructureError::ReinstallFailed {
                command: self.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program(), self.install_args().join(" "))
    }
}
