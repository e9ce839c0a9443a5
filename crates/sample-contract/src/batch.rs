/// Batch runner: discover every sample under a repository root and check each one.
///
/// Samples are the immediate subdirectories of any directory named like
/// `ContractConfig::samples_dir_name`. Discovery is sorted by path, so the
/// accumulated failures come out in the same order on every run.
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::folder::FolderListing;
use crate::report::Finding;
use crate::sample::SampleFolder;

/// One reported failure, tagged with the sample it belongs to.
#[derive(Debug)]
pub struct Failure {
    pub sample: PathBuf,
    pub finding: Finding,
}

/// Outcome of checking a set of samples.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub samples_checked: usize,
    pub failures: Vec<Failure>,
}

impl BatchSummary {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Numbered, human-readable report lines: `N. <sample path> - <finding>`.
    pub fn report_lines(&self) -> Vec<String> {
        self.failures
            .iter()
            .enumerate()
            .map(|(i, failure)| {
                format!("{}. {} - {}", i + 1, failure.sample.display(), failure.finding)
            })
            .collect()
    }
}

/// Find every sample folder below `root`, sorted by path.
///
/// Folders that are empty apart from `.DS_Store`-style entries are skipped;
/// git would not have kept them. Only an unreadable `root` is an error.
/// Anything unreadable below it is logged and the walk goes on, and a
/// sample folder that cannot be listed is still returned so its check
/// reports the failure against that sample.
pub fn discover_samples(root: &Path, config: &ContractConfig) -> Result<Vec<SampleFolder>> {
    let mut samples = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(ContractError::io(root, source));
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_dir() || entry.file_name() != config.samples_dir_name.as_str() {
            continue;
        }

        let dir = match std::fs::read_dir(entry.path()) {
            Ok(dir) => dir,
            Err(e) => {
                warn!(dir = %entry.path().display(), error = %e, "cannot list samples directory");
                continue;
            }
        };
        let mut children: Vec<PathBuf> = dir
            .filter_map(|child| match child {
                Ok(child) => Some(child.path()),
                Err(e) => {
                    warn!(dir = %entry.path().display(), error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect();
        children.sort();

        samples.extend(
            children
                .into_iter()
                .filter(|child| is_sample_candidate(child, config))
                .map(SampleFolder::new),
        );
    }

    samples.sort_by(|a, b| a.path.cmp(&b.path));
    info!(root = %root.display(), samples = samples.len(), "discovered samples");
    Ok(samples)
}

fn is_sample_candidate(folder: &Path, config: &ContractConfig) -> bool {
    match FolderListing::read(folder) {
        Ok(listing) if listing.is_effectively_empty(&config.ignored_entry_prefix) => {
            debug!(path = %folder.display(), "skipping empty sample folder");
            false
        }
        Ok(_) => true,
        Err(e) => {
            warn!(path = %folder.display(), error = %e, "cannot list sample folder, checking it anyway");
            true
        }
    }
}

/// Run `check` on every sample and collect all findings.
///
/// A failing sample never stops the run; every sample is checked.
pub fn run_checks<F>(samples: &[SampleFolder], mut check: F) -> BatchSummary
where
    F: FnMut(&SampleFolder) -> Vec<Finding>,
{
    let mut summary = BatchSummary::default();
    for sample in samples {
        let findings = check(sample);
        for finding in &findings {
            debug!(
                sample = %sample,
                rule = finding.rule.label(),
                kind = finding.error.kind(),
                "sample failed"
            );
        }
        summary.failures.extend(findings.into_iter().map(|finding| Failure {
            sample: sample.path.clone(),
            finding,
        }));
        summary.samples_checked += 1;
    }
    summary
}

/// Discover all samples under `root` and run `check` on each.
pub fn run_all<F>(root: &Path, config: &ContractConfig, check: F) -> Result<BatchSummary>
where
    F: FnMut(&SampleFolder) -> Vec<Finding>,
{
    let samples = discover_samples(root, config)?;
    Ok(run_checks(&samples, check))
}
