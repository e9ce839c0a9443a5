mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sample_contract::batch::BatchSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{Target, TargetArgs};
use config::Config;
use error::AppError;

/// Check sample folders for README formatting and metadata consistency.
#[derive(Parser, Debug)]
#[command(name = "sample-docs-lint", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check README formatting rules.
    Readme(TargetArgs),

    /// Check that README.metadata.json matches the README and sample files.
    Metadata(TargetArgs),

    /// Derive a metadata record for one sample and write it to new-README.metadata.json.
    Create {
        /// Path to the sample folder.
        path: PathBuf,
    },

    /// Check the samples touched by a JSON array of changed file paths.
    Changed {
        /// JSON array of changed file paths, e.g. '["a/b/Samples/X/README.md"]'.
        #[arg(short = 's', long, alias = "string", value_name = "JSON")]
        files: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the numbered report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(
        snippet_extension = %config.contract.snippet_extension,
        samples_dir = %config.contract.samples_dir_name,
        "configuration loaded"
    );

    match cli.command {
        Commands::Readme(args) => {
            let target = args.target()?;
            let summary = commands::readme(&target, &config.contract)?;
            finish(&summary, &target)?;
        }
        Commands::Metadata(args) => {
            let target = args.target()?;
            let summary = commands::metadata(&target, &config.contract)?;
            finish(&summary, &target)?;
        }
        Commands::Create { path } => {
            let written = commands::create(&path, &config.contract)?;
            println!("{}", written.display());
        }
        Commands::Changed { files } => {
            let summary = commands::changed(&files, &config.contract)?;
            report(&summary, "changed samples")?;
        }
    }

    Ok(())
}

fn finish(summary: &BatchSummary, target: &Target) -> Result<(), AppError> {
    report(summary, target.scope())
}

/// Print the numbered failure list and fail when it is non-empty.
fn report(summary: &BatchSummary, scope: &str) -> Result<(), AppError> {
    for line in summary.report_lines() {
        println!("{line}");
    }
    if summary.is_success() {
        info!(samples = summary.samples_checked, "all checks passed");
        return Ok(());
    }
    Err(AppError::ChecksFailed {
        failures: summary.failure_count(),
        scope: scope.to_string(),
    })
}
