// scour/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use scour_core::ScourError;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug scour clean ... pour voir les détails, sinon -v / -vv
    init_tracing(cli.verbose);

    let result = match cli.command {
        // --- USE CASE: CLEAN ---
        Commands::Clean(args) => commands::clean::execute(args).await,

        // --- USE CASE: SHOW RESOLVED CONFIG ---
        Commands::Config { project, format } => commands::config::execute(project, format).await,

        // --- USE CASE: PATH REDUCTION ---
        Commands::Dedupe { paths } => commands::dedupe::execute(paths),
    };

    if let Err(e) = result {
        match e.downcast::<ScourError>() {
            Ok(err) => eprintln!("❌ {:?}", miette::Report::new(err)),
            Err(e) => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Logs on stderr: stdout stays reserved for reports and `config` output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
