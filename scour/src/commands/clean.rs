// scour/src/commands/clean.rs
//
// USE CASE: Locate, size and delete build artifacts.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use tracing::debug;

use scour_core::ConfigLoader;
use scour_core::application::{
    CleanMode, CleanOptions, CleanReport, TargetOutcome, clean_project,
};
use scour_core::infrastructure::fs::format_size;
use scour_core::infrastructure::scanner::TargetKind;

use crate::cli::CleanArgs;

pub async fn execute(args: CleanArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    let options = CleanOptions {
        load: super::load_options(&args.project)?,
        dry_run: args.dry_run,
        confirmed: args.yes,
        targets: args.targets,
        ignore: args.ignore,
        skip_hooks: args.no_hooks,
        reinstall: args.reinstall,
        ..Default::default()
    };

    debug!(?options, "Clean options");
    let loader = ConfigLoader::with_defaults();
    let report = clean_project(&loader, &options).await?;

    match &report.config_file {
        Some(file) => println!("⚙️  Configuration: {}", file.display()),
        None => println!("⚙️  Configuration: built-in defaults"),
    }

    if report.targets.is_empty() {
        println!("✨ Nothing to clean in {}", report.project_root.display());
        return Ok(());
    }

    println!("{}", render(&report));

    match report.mode {
        CleanMode::DryRun => {
            println!(
                "\n🔍 Dry run: {} target(s), {} would be freed.",
                report.targets.len(),
                format_size(report.total_size())
            );
        }
        CleanMode::Unconfirmed => {
            println!(
                "\n⚠️  {} target(s), {} total. Nothing was deleted.\n👉 Re-run with --yes to delete them.",
                report.targets.len(),
                format_size(report.total_size())
            );
        }
        CleanMode::Delete => {
            if let Some(pm) = report.reinstalled {
                println!("📦 Dependencies reinstalled with '{}'", pm);
            }

            for error in &report.post_errors {
                eprintln!("⚠️  {}", error);
            }

            let failures = report.failures();
            if !failures.is_empty() {
                anyhow::bail!(
                    "{} target(s) could not be deleted ({} freed)",
                    failures.len(),
                    format_size(report.freed())
                );
            }
            if !report.is_success() {
                anyhow::bail!(
                    "Clean finished with errors after deletion ({} freed)",
                    format_size(report.freed())
                );
            }
            println!(
                "\n✨ SUCCESS! {} freed in {:.2?}",
                format_size(report.freed()),
                start.elapsed()
            );
        }
    }

    Ok(())
}

fn render(report: &CleanReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Target", "Kind", "Size", "Status"]);

    for target in &report.targets {
        let kind = match target.kind {
            TargetKind::Directory => "dir",
            TargetKind::File => "file",
        };
        let status = match &target.outcome {
            TargetOutcome::Planned => "pending".to_string(),
            TargetOutcome::Deleted { attempts: 1 } => "deleted".to_string(),
            TargetOutcome::Deleted { attempts } => format!("deleted ({} attempts)", attempts),
            TargetOutcome::Failed(reason) => format!("failed: {}", reason),
        };
        table.add_row(vec![
            target.relative.clone(),
            kind.to_string(),
            format_size(target.size),
            status,
        ]);
    }
    table
}
