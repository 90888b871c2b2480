// scour-core/src/infrastructure/config/extends.rs

use futures::future::BoxFuture;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::config::{Configuration, merge, validate};
use crate::domain::error::{ConfigScope, DomainError};
use crate::domain::ports::ConfigSource;
use crate::error::ScourError;
use crate::infrastructure::error::InfrastructureError;

/// Follows `extends` references and folds the referenced files underneath the
/// configuration that declared them.
pub struct ExtendsResolver<'a> {
    source: &'a dyn ConfigSource,
}

impl<'a> ExtendsResolver<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self { source }
    }

    /// Resolves the whole extends tree of `config` with a fresh visited set.
    pub async fn resolve(
        &self,
        config: Configuration,
        base_dir: &Path,
    ) -> Result<Configuration, ScourError> {
        let mut visited = HashSet::new();
        self.resolve_with(config, base_dir, &mut visited).await
    }

    /// Resolves `config` relative to `base_dir`.
    ///
    /// `visited` is shared by every branch below the top call, so a file
    /// reachable twice (a cycle, or a diamond) is rejected.
    pub fn resolve_with<'b>(
        &'b self,
        config: Configuration,
        base_dir: &'b Path,
        visited: &'b mut HashSet<PathBuf>,
    ) -> BoxFuture<'b, Result<Configuration, ScourError>> {
        Box::pin(async move {
            let entries: Vec<String> = config
                .extends_entries()
                .into_iter()
                .map(str::to_owned)
                .collect();

            let mut acc = config;
            for entry in entries {
                let target = resolve_path(base_dir, &entry)?;

                if !visited.insert(target.clone()) {
                    return Err(DomainError::ExtendsCycle(target).into());
                }
                if !self.source.exists(&target).await {
                    return Err(InfrastructureError::ExtendsNotFound(target).into());
                }

                let raw = match self.source.load_file(&target).await {
                    Ok(Some(raw)) => raw,
                    Ok(None) => return Err(InfrastructureError::ExtendsLoadFailure(target).into()),
                    Err(e) => {
                        warn!(path = ?target, error = %e, "Extended configuration could not be read");
                        return Err(InfrastructureError::ExtendsLoadFailure(target).into());
                    }
                };

                let base = validate(&raw.config).map_err(|violations| {
                    DomainError::SchemaViolation {
                        scope: ConfigScope::Extends,
                        file: target.display().to_string(),
                        summary: violations.summary(),
                    }
                })?;

                debug!(path = ?target, "Resolved extends entry");
                let parent = target
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base_dir.to_path_buf());
                let resolved = self.resolve_with(base, &parent, visited).await?;

                // L'accumulateur garde la priorité sur la base héritée
                acc = merge(&resolved, &acc);
            }

            Ok(acc)
        })
    }
}

/// Joins `entry` onto `base_dir` and collapses `.` / `..` without touching the
/// filesystem.
pub fn resolve_path(base_dir: &Path, entry: &str) -> Result<PathBuf, ScourError> {
    let joined = std::path::absolute(base_dir.join(entry))?;
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::config::{Extends, Hooks};
    use crate::infrastructure::config::source::FileConfigSource;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn root_config(extends: Extends) -> Configuration {
        Configuration {
            extends: Some(extends),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_path_collapses_dots() -> Result<()> {
        let base = Path::new("/projects/app/config");
        assert_eq!(
            resolve_path(base, "../shared/./base.json")?,
            PathBuf::from("/projects/app/shared/base.json")
        );
        assert_eq!(
            resolve_path(base, "/etc/scour.json")?,
            PathBuf::from("/etc/scour.json")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_absent_extends_is_noop() -> Result<()> {
        let dir = tempdir()?;
        let source = FileConfigSource::new();
        let config = Configuration {
            targets: Some(vec!["dist".into()]),
            ..Default::default()
        };

        let resolved = ExtendsResolver::new(&source)
            .resolve(config.clone(), dir.path())
            .await?;
        assert_eq!(resolved, config);
        Ok(())
    }

    #[tokio::test]
    async fn test_chain_root_fields_win() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("presets"))?;
        fs::write(
            dir.path().join("presets/grand.json"),
            r#"{ "targets": ["grand"], "ignore": ["grand-ignore"], "hooks": { "postClean": "grand-post" } }"#,
        )?;
        fs::write(
            dir.path().join("presets/base.yaml"),
            "extends: ./grand.json\ntargets: [base]\nhooks:\n  preClean: base-pre\n",
        )?;

        let source = FileConfigSource::new();
        let root = Configuration {
            targets: Some(vec!["root".into()]),
            ..root_config(Extends::One("./presets/base.yaml".into()))
        };

        let resolved = ExtendsResolver::new(&source)
            .resolve(root, dir.path())
            .await?;

        assert_eq!(resolved.targets, Some(vec!["root".to_string()]));
        assert_eq!(resolved.ignore, Some(vec!["grand-ignore".to_string()]));
        assert_eq!(
            resolved.hooks,
            Some(Hooks {
                pre_clean: Some("base-pre".into()),
                post_clean: Some("grand-post".into()),
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_earlier_entries_take_precedence() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.json"), r#"{ "targets": ["a"] }"#)?;
        fs::write(
            dir.path().join("b.json"),
            r#"{ "targets": ["b"], "ignore": ["b"] }"#,
        )?;

        let source = FileConfigSource::new();
        let root = root_config(Extends::Many(vec!["a.json".into(), "b.json".into()]));
        let resolved = ExtendsResolver::new(&source)
            .resolve(root, dir.path())
            .await?;

        assert_eq!(resolved.targets, Some(vec!["a".to_string()]));
        assert_eq!(resolved.ignore, Some(vec!["b".to_string()]));
        Ok(())
    }

    #[tokio::test]
    async fn test_cycle_is_detected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#)?;
        fs::write(dir.path().join("b.json"), r#"{ "extends": "./a.json" }"#)?;

        let source = FileConfigSource::new();
        let err = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("a.json".into())), dir.path())
            .await
            .unwrap_err();

        match err {
            ScourError::Domain(DomainError::ExtendsCycle(path)) => {
                assert!(path.ends_with("a.json"));
            }
            other => panic!("Expected ExtendsCycle, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_self_reference_is_a_cycle() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("self.json"), r#"{ "extends": "self.json" }"#)?;

        let source = FileConfigSource::new();
        let result = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("self.json".into())), dir.path())
            .await;
        assert!(matches!(
            result,
            Err(ScourError::Domain(DomainError::ExtendsCycle(_)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_diamond_shares_visited_set() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("left.json"), r#"{ "extends": "shared.json" }"#)?;
        fs::write(dir.path().join("right.json"), r#"{ "extends": "shared.json" }"#)?;
        fs::write(dir.path().join("shared.json"), r#"{ "targets": ["s"] }"#)?;

        let source = FileConfigSource::new();
        let root = root_config(Extends::Many(vec!["left.json".into(), "right.json".into()]));
        let result = ExtendsResolver::new(&source).resolve(root, dir.path()).await;
        assert!(matches!(
            result,
            Err(ScourError::Domain(DomainError::ExtendsCycle(_)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_target() -> Result<()> {
        let dir = tempdir()?;
        let source = FileConfigSource::new();
        let result = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("nope.json".into())), dir.path())
            .await;
        assert!(matches!(
            result,
            Err(ScourError::Infrastructure(
                InfrastructureError::ExtendsNotFound(_)
            ))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_target() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("bad.json"), "{ nope")?;

        let source = FileConfigSource::new();
        let result = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("bad.json".into())), dir.path())
            .await;
        assert!(matches!(
            result,
            Err(ScourError::Infrastructure(
                InfrastructureError::ExtendsLoadFailure(_)
            ))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_directory_target_is_a_load_failure() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("preset"))?;

        let source = FileConfigSource::new();
        let err = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("preset".into())), dir.path())
            .await
            .unwrap_err();

        match err {
            ScourError::Infrastructure(InfrastructureError::ExtendsLoadFailure(path)) => {
                assert!(path.ends_with("preset"));
            }
            other => panic!("Expected ExtendsLoadFailure, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_comment_only_preset_is_empty() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("comment.yml"), "# preset to fill in\n")?;

        let source = FileConfigSource::new();
        let root = Configuration {
            targets: Some(vec!["dist".into()]),
            ..root_config(Extends::One("comment.yml".into()))
        };
        let resolved = ExtendsResolver::new(&source)
            .resolve(root, dir.path())
            .await?;
        assert_eq!(resolved.targets, Some(vec!["dist".to_string()]));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_target_mentions_extends() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("base.json"), r#"{ "targets": 1 }"#)?;

        let source = FileConfigSource::new();
        let err = ExtendsResolver::new(&source)
            .resolve(root_config(Extends::One("base.json".into())), dir.path())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("extends"));
        assert!(message.contains("base.json"));
        assert!(message.contains("- targets:"));
        Ok(())
    }
}
