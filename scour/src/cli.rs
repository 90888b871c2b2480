// scour/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scour")]
#[command(about = "Locates, sizes and deletes build artifacts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧹 Deletes the build artifacts matched by the configured targets
    Clean(CleanArgs),

    /// ⚙️  Prints the resolved configuration and where it came from
    Config {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },

    /// ✂️  Collapses paths to their top-level ancestors
    Dedupe {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Global configuration file (lowest precedence)
    #[arg(long, env = "SCOUR_GLOBAL_CONFIG")]
    pub global_config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Show what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Confirm deletion
    #[arg(long, short)]
    pub yes: bool,

    /// Target pattern, replaces the configured targets (repeatable)
    #[arg(long = "target", short = 't')]
    pub targets: Vec<String>,

    /// Extra ignore pattern (repeatable)
    #[arg(long = "ignore", short = 'i')]
    pub ignore: Vec<String>,

    /// Reinstall dependencies once the clean succeeded
    #[arg(long)]
    pub reinstall: bool,

    /// Skip the preClean / postClean hooks
    #[arg(long)]
    pub no_hooks: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_clean_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["scour", "clean"])?;
        match args.command {
            Commands::Clean(clean) => {
                assert_eq!(clean.project.project_dir.to_string_lossy(), ".");
                assert!(!clean.dry_run);
                assert!(!clean.yes);
                assert!(clean.targets.is_empty());
                Ok(())
            }
            _ => bail!("Expected Clean command"),
        }
    }

    #[test]
    fn test_cli_parse_clean_flags() -> Result<()> {
        let args = Cli::try_parse_from([
            "scour",
            "-vv",
            "clean",
            "--project-dir",
            "/tmp/app",
            "-t",
            "dist",
            "--target",
            "build",
            "-i",
            "dist/keep",
            "--dry-run",
            "--yes",
            "--no-hooks",
            "--reinstall",
        ])?;
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Clean(clean) => {
                assert_eq!(clean.project.project_dir.to_string_lossy(), "/tmp/app");
                assert_eq!(clean.targets, vec!["dist", "build"]);
                assert_eq!(clean.ignore, vec!["dist/keep"]);
                assert!(clean.dry_run && clean.yes && clean.no_hooks && clean.reinstall);
                Ok(())
            }
            _ => bail!("Expected Clean command"),
        }
    }

    #[test]
    fn test_cli_parse_config_format() -> Result<()> {
        let args = Cli::try_parse_from(["scour", "config", "--format", "json"])?;
        match args.command {
            Commands::Config { format, .. } => {
                assert_eq!(format, OutputFormat::Json);
                Ok(())
            }
            _ => bail!("Expected Config command"),
        }
    }

    #[test]
    fn test_cli_dedupe_requires_paths() {
        assert!(Cli::try_parse_from(["scour", "dedupe"]).is_err());
    }
}
