use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::infrastructure::error::InfrastructureError;

/// How hard [`remove_with_retry`] tries before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Base delay; attempt `n` waits `delay * n` before the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(100),
        }
    }
}

/// Remove a file or directory tree, retrying transient failures.
///
/// A path that is already gone counts as removed. Returns the number of
/// attempts that were needed.
pub async fn remove_with_retry(path: &Path, policy: RetryPolicy) -> Result<u32, InfrastructureError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match remove_once(path).await {
            Ok(()) => return Ok(attempt),
            Err(e) if attempt >= attempts => {
                return Err(InfrastructureError::DeleteFailed {
                    path: path.to_path_buf(),
                    attempts,
                    source: e,
                });
            }
            Err(e) => {
                warn!(path = ?path, attempt, error = %e, "Deletion failed, retrying");
                tokio::time::sleep(policy.delay * attempt).await;
                attempt += 1;
            }
        }
    }
}

async fn remove_once(path: &Path) -> std::io::Result<()> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match result {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => {
            debug!(path = ?path, "Removed");
            other
        }
    }
}

/// Size on disk of a file or directory tree, in bytes.
pub fn path_size(path: &Path) -> Result<u64, InfrastructureError> {
    let metadata = std::fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs_extra::dir::get_size(path)
            .map_err(|e| InfrastructureError::Io(std::io::Error::other(e.to_string())))
    } else {
        Ok(metadata.len())
    }
}

/// Format bytes as human-readable
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else if b < KIB * KIB * KIB {
        format!("{:.1} MiB", b / (KIB * KIB))
    } else {
        format!("{:.1} GiB", b / (KIB * KIB * KIB))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn fast() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_removes_directory_tree_and_file() -> Result<()> {
        let dir = tempdir()?;
        let tree = dir.path().join("dist/assets");
        fs::create_dir_all(&tree)?;
        fs::write(tree.join("app.js"), "x")?;
        let file = dir.path().join("build.log");
        fs::write(&file, "log")?;

        assert_eq!(remove_with_retry(&dir.path().join("dist"), fast()).await?, 1);
        assert_eq!(remove_with_retry(&file, fast()).await?, 1);
        assert!(!dir.path().join("dist").exists());
        assert!(!file.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_path_counts_as_removed() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(remove_with_retry(&dir.path().join("ghost"), fast()).await?, 1);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_persistent_failure_reports_attempts() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x")?;

        // A path "below" a regular file can never be resolved
        let err = remove_with_retry(&file.join("child"), fast())
            .await
            .unwrap_err();
        match err {
            InfrastructureError::DeleteFailed { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("Expected DeleteFailed, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_path_size_sums_tree() -> Result<()> {
        let dir = tempdir()?;
        let tree = dir.path().join("out");
        fs::create_dir_all(tree.join("nested"))?;
        fs::write(tree.join("a.bin"), vec![0u8; 100])?;
        fs::write(tree.join("nested/b.bin"), vec![0u8; 50])?;

        // Directory entries themselves may or may not be counted
        assert!(path_size(&tree)? >= 150);
        assert_eq!(path_size(&tree.join("a.bin"))?, 100);
        Ok(())
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
