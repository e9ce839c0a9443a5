use sample_contract::ContractConfig;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
///
/// Every variable is optional; unset ones keep the `ContractConfig` default.
/// A variable that is set but empty is rejected rather than silently ignored.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub contract: ContractConfig,
}

impl Config {
    /// Optional:
    /// - `SAMPLE_DOCS_SNIPPET_EXTENSION`: source file extension collected into `snippets` (default `swift`)
    /// - `SAMPLE_DOCS_SAMPLES_DIR`: name of the directories holding samples (default `Samples`)
    /// - `SAMPLE_DOCS_README_NAME`: README file name (default `README.md`)
    /// - `SAMPLE_DOCS_METADATA_NAME`: metadata file name (default `README.metadata.json`)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut contract = ContractConfig::default();

        let read = |key: &str| -> Result<Option<String>, AppError> {
            match lookup(key) {
                Some(value) if value.trim().is_empty() => Err(AppError::Config(format!(
                    "{key} is set but empty"
                ))),
                other => Ok(other),
            }
        };

        if let Some(ext) = read("SAMPLE_DOCS_SNIPPET_EXTENSION")? {
            let ext = ext.trim_start_matches('.');
            if ext.is_empty() {
                return Err(AppError::Config(
                    "SAMPLE_DOCS_SNIPPET_EXTENSION must name an extension".to_string(),
                ));
            }
            contract.snippet_extension = ext.to_string();
        }
        if let Some(dir) = read("SAMPLE_DOCS_SAMPLES_DIR")? {
            contract.samples_dir_name = dir;
        }
        if let Some(name) = read("SAMPLE_DOCS_README_NAME")? {
            contract.readme_file_name = name;
        }
        if let Some(name) = read("SAMPLE_DOCS_METADATA_NAME")? {
            contract.metadata_file_name = name;
        }

        Ok(Self { contract })
    }
}
