// scour-core/src/infrastructure/scanner.rs

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::paths::deduplicate_paths;
use crate::error::ScourError;
use crate::infrastructure::error::InfrastructureError;

/// Used when no configuration source sets `targets`.
pub const DEFAULT_TARGETS: [&str; 8] = [
    "node_modules",
    "dist",
    "build",
    "target",
    ".next",
    ".turbo",
    ".cache",
    "coverage",
];

/// Never descended into, never deleted.
const ALWAYS_SKIPPED: [&str; 1] = [".git"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Directory,
    File,
}

/// A path matched by a target pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTarget {
    /// Relative to the project root, `/`-separated.
    pub relative: String,
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Expands target patterns below a project root.
///
/// A pattern without `/` matches at any depth (`node_modules`); a pattern
/// with `/` is anchored at the root (`packages/*/dist`). A leading `/` or
/// `./` only anchors.
pub struct TargetScanner {
    root: PathBuf,
    targets: GlobSet,
    ignore: GlobSet,
}

impl TargetScanner {
    pub fn new<S: AsRef<str>>(
        root: impl Into<PathBuf>,
        targets: &[S],
        ignore: &[S],
    ) -> Result<Self, ScourError> {
        Ok(Self {
            root: root.into(),
            targets: build_set(targets)?,
            ignore: build_set(ignore)?,
        })
    }

    pub fn is_target(&self, relative: &str) -> bool {
        self.targets.is_match(relative)
    }

    pub fn is_ignored(&self, relative: &str) -> bool {
        self.ignore.is_match(relative)
    }

    /// Walks the tree and returns the top-level matches, sorted by path.
    /// Symlinks are not followed and matched directories are not descended
    /// into.
    pub fn scan(&self) -> Vec<ScannedTarget> {
        let mut found: HashMap<String, ScannedTarget> = HashMap::new();
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let is_dir = entry.file_type().is_dir();
            let name = entry.file_name().to_string_lossy();
            if is_dir && ALWAYS_SKIPPED.contains(&name.as_ref()) {
                walker.skip_current_dir();
                continue;
            }

            let Some(relative) = relative_path(&self.root, entry.path()) else {
                continue;
            };

            if self.is_ignored(&relative) {
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }

            if self.is_target(&relative) {
                debug!(path = %relative, "Matched target");
                let kind = if is_dir {
                    walker.skip_current_dir();
                    TargetKind::Directory
                } else {
                    TargetKind::File
                };
                found.insert(
                    relative.clone(),
                    ScannedTarget {
                        relative,
                        path: entry.path().to_path_buf(),
                        kind,
                    },
                );
            }
        }

        let keys: Vec<&String> = found.keys().collect();
        let mut kept = deduplicate_paths(&keys);
        kept.sort();
        kept.into_iter()
            .filter_map(|key| found.remove(&key))
            .collect()
    }
}

fn build_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, ScourError> {
    let mut builder = GlobSetBuilder::new();
    for raw in patterns {
        let (pattern, anchored) = sanitize(raw.as_ref())?;
        builder.add(compile(&pattern)?);
        if !anchored {
            builder.add(compile(&format!("**/{pattern}"))?);
        }
    }
    builder.build().map_err(|source| {
        ScourError::from(InfrastructureError::Glob {
            pattern: "<set>".to_string(),
            source,
        })
    })
}

fn compile(pattern: &str) -> Result<globset::Glob, ScourError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| {
            ScourError::from(InfrastructureError::Glob {
                pattern: pattern.to_string(),
                source,
            })
        })
}

/// Zero-Trust guard: patterns stay inside the project root.
///
/// Returns the cleaned pattern and whether it is anchored at the root.
fn sanitize(raw: &str) -> Result<(String, bool), ScourError> {
    let unified = raw.trim().replace('\\', "/");
    let (body, explicit) = match unified
        .strip_prefix("./")
        .or_else(|| unified.strip_prefix('/'))
    {
        Some(rest) => (rest, true),
        None => (unified.as_str(), false),
    };
    let pattern = body.trim_end_matches('/');

    if pattern.is_empty() || pattern == "." || pattern == "**" {
        return Err(ScourError::UnsafePath(format!(
            "'{raw}' would match the whole project"
        )));
    }
    if Path::new(pattern)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(ScourError::UnsafePath(raw.to_string()));
    }
    Ok((pattern.to_string(), explicit || pattern.contains('/')))
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    const NONE: &[&str] = &[];

    fn touch(root: &Path, rel: &str) -> Result<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, b"x")?;
        Ok(())
    }

    fn relatives(found: &[ScannedTarget]) -> Vec<&str> {
        found.iter().map(|t| t.relative.as_str()).collect()
    }

    #[test]
    fn test_bare_names_match_at_any_depth() -> Result<()> {
        let dir = tempdir()?;
        touch(dir.path(), "node_modules/react/index.js")?;
        touch(dir.path(), "node_modules/react/node_modules/x/a.js")?;
        touch(dir.path(), "packages/ui/node_modules/b.js")?;
        touch(dir.path(), "src/main.ts")?;

        let scanner = TargetScanner::new(dir.path(), &["node_modules"], NONE)?;
        let found = scanner.scan();

        assert_eq!(
            relatives(&found),
            vec!["node_modules", "packages/ui/node_modules"]
        );
        assert!(found.iter().all(|t| t.kind == TargetKind::Directory));
        Ok(())
    }

    #[test]
    fn test_anchored_patterns_and_file_globs() -> Result<()> {
        let dir = tempdir()?;
        touch(dir.path(), "packages/a/dist/index.js")?;
        touch(dir.path(), "packages/a/src/dist/keep.js")?;
        touch(dir.path(), "tsconfig.tsbuildinfo")?;
        touch(dir.path(), "packages/a/tsconfig.tsbuildinfo")?;

        let scanner = TargetScanner::new(
            dir.path(),
            &["packages/*/dist", "*.tsbuildinfo"],
            NONE,
        )?;
        let found = scanner.scan();

        assert_eq!(
            relatives(&found),
            vec![
                "packages/a/dist",
                "packages/a/tsconfig.tsbuildinfo",
                "tsconfig.tsbuildinfo"
            ]
        );
        let file = found.iter().find(|t| t.relative == "tsconfig.tsbuildinfo").unwrap();
        assert_eq!(file.kind, TargetKind::File);
        Ok(())
    }

    #[test]
    fn test_ignore_excludes_and_prunes() -> Result<()> {
        let dir = tempdir()?;
        touch(dir.path(), "dist/a.js")?;
        touch(dir.path(), "vendor/lib/dist/b.js")?;
        touch(dir.path(), ".git/dist/c")?;

        let scanner = TargetScanner::new(dir.path(), &["dist"], &["vendor"])?;
        assert_eq!(relatives(&scanner.scan()), vec!["dist"]);
        Ok(())
    }

    #[test]
    fn test_unsafe_patterns_rejected() {
        for bad in ["../outside", "a/../../b", "", "./", "/", "**"] {
            let result = TargetScanner::new("/tmp", &[bad], NONE);
            assert!(
                matches!(result, Err(ScourError::UnsafePath(_))),
                "pattern {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_leading_slash_only_anchors() -> Result<()> {
        let scanner = TargetScanner::new("/p", &["/build"], NONE)?;
        assert!(scanner.is_target("build"));
        assert!(!scanner.is_target("sub/build"));

        let scanner = TargetScanner::new("/p", &["./dist/"], NONE)?;
        assert!(scanner.is_target("dist"));
        assert!(!scanner.is_target("packages/a/dist"));

        let scanner = TargetScanner::new("/p", &["build"], NONE)?;
        assert!(scanner.is_target("sub/build"));
        assert!(!scanner.is_target("sub/buildx"));
        Ok(())
    }

    #[test]
    fn test_empty_target_list_matches_nothing() -> Result<()> {
        let dir = tempdir()?;
        touch(dir.path(), "dist/a.js")?;
        let scanner = TargetScanner::new(dir.path(), NONE, NONE)?;
        assert!(scanner.scan().is_empty());
        Ok(())
    }
}
