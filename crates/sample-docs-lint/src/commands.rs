/// Subcommand handlers.
///
/// Each handler returns a `BatchSummary`; `main` prints it and turns a
/// non-empty one into a failing exit status.
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use sample_contract::batch::{run_all, run_checks, BatchSummary, Failure};
use sample_contract::metadata::{check_metadata, create_metadata};
use sample_contract::readme::check_readme;
use sample_contract::{ContractConfig, ContractError, Finding, Rule, SampleFolder};
use tracing::{debug, info};

use crate::error::AppError;

/// Which samples a check runs on.
#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Path to the project root folder; every sample below it is checked.
    #[arg(short, long, value_name = "ROOT")]
    pub all: Option<PathBuf>,
    /// Path to a single sample folder.
    #[arg(short, long, value_name = "SAMPLE")]
    pub single: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All(PathBuf),
    Single(PathBuf),
}

impl TargetArgs {
    pub fn target(&self) -> Result<Target, AppError> {
        match (&self.all, &self.single) {
            (Some(root), None) => Ok(Target::All(root.clone())),
            (None, Some(sample)) => Ok(Target::Single(sample.clone())),
            _ => Err(AppError::Input(
                "exactly one of --all or --single is required".to_string(),
            )),
        }
    }
}

impl Target {
    pub fn scope(&self) -> &'static str {
        match self {
            Self::All(_) => "all samples",
            Self::Single(_) => "a single sample",
        }
    }
}

pub fn readme(target: &Target, config: &ContractConfig) -> Result<BatchSummary, AppError> {
    run_target(target, config, |sample| check_readme(sample, config))
}

pub fn metadata(target: &Target, config: &ContractConfig) -> Result<BatchSummary, AppError> {
    run_target(target, config, |sample| check_metadata(sample, config))
}

pub fn create(path: &Path, config: &ContractConfig) -> Result<PathBuf, AppError> {
    Ok(create_metadata(&SampleFolder::new(path), config)?)
}

fn run_target<F>(target: &Target, config: &ContractConfig, check: F) -> Result<BatchSummary, AppError>
where
    F: FnMut(&SampleFolder) -> Vec<Finding>,
{
    let summary = match target {
        Target::All(root) => run_all(root, config, check)?,
        Target::Single(path) => run_checks(&[SampleFolder::new(path)], check),
    };
    info!(
        samples = summary.samples_checked,
        failures = summary.failure_count(),
        "check finished"
    );
    Ok(summary)
}

/// `<group>/<samples dir>/<sample>/<file>`: the shallowest path that can sit in a sample.
const MIN_CHANGED_FILE_DEPTH: usize = 4;

/// Number of named components. A root, prefix or `.` does not count, so
/// `/Samples/X/README.md` is three deep, the same as `Samples/X/README.md`.
fn path_depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// CI entry point: check the samples touched by a list of changed files.
///
/// Only `README.md` and `README.metadata.json` files at least four path
/// components deep count. Deleted files are ignored. Each affected sample
/// folder is checked once with both the README and the metadata checker.
pub fn changed(files_json: &str, config: &ContractConfig) -> Result<BatchSummary, AppError> {
    let files: Vec<PathBuf> = serde_json::from_str(files_json)
        .map_err(|e| AppError::Input(format!("expected a JSON array of file paths: {e}")))?;
    if files.is_empty() {
        return Err(AppError::Input("no changed files given".to_string()));
    }

    let readme_name = config.readme_file_name.as_str();
    let metadata_name = config.metadata_file_name.as_str();

    let mut naming_failures = Vec::new();
    let mut seen = HashSet::new();
    let mut samples = Vec::new();

    for file in &files {
        if !file.exists() {
            debug!(path = %file.display(), "changed file was deleted, skipping");
            continue;
        }
        if path_depth(file) < MIN_CHANGED_FILE_DEPTH {
            debug!(path = %file.display(), "changed file is too shallow to be in a sample");
            continue;
        }
        let (Some(file_name), Some(dir)) = (
            file.file_name().and_then(|n| n.to_str()),
            file.parent(),
        ) else {
            continue;
        };

        let lower = file_name.to_lowercase();
        let is_readme = lower == readme_name.to_lowercase();
        let is_metadata = lower == metadata_name.to_lowercase();
        if !is_readme && !is_metadata {
            continue;
        }

        let expected = if is_readme { readme_name } else { metadata_name };
        if file_name != expected {
            naming_failures.push(Failure {
                sample: dir.to_path_buf(),
                finding: Finding::new(
                    Rule::FileName,
                    ContractError::format(format!(
                        "\"{file_name}\" has wrong capitalization, expected \"{expected}\"."
                    )),
                ),
            });
        }

        if seen.insert(dir.to_path_buf()) {
            info!(sample = %dir.display(), "checking changed sample");
            samples.push(SampleFolder::new(dir));
        }
    }

    let mut summary = run_checks(&samples, |sample| {
        let mut findings = check_readme(sample, config);
        findings.extend(check_metadata(sample, config));
        findings
    });
    naming_failures.append(&mut summary.failures);
    summary.failures = naming_failures;
    Ok(summary)
}
