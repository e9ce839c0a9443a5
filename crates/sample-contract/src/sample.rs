use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::text::folder_name;

/// A sample folder under validation. Its name doubles as the expected README title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFolder {
    pub path: PathBuf,
    pub name: String,
}

impl SampleFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = folder_name(&path);
        Self { path, name }
    }

    pub fn readme_path(&self, config: &ContractConfig) -> PathBuf {
        self.path.join(&config.readme_file_name)
    }

    pub fn metadata_path(&self, config: &ContractConfig) -> PathBuf {
        self.path.join(&config.metadata_file_name)
    }

    pub fn generated_metadata_path(&self, config: &ContractConfig) -> PathBuf {
        self.path.join(&config.generated_metadata_file_name)
    }
}

impl fmt::Display for SampleFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Read a whole UTF-8 file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ContractError::io(path, e))
}

/// Read a persisted metadata record as raw JSON.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| ContractError::Json {
        path: path.to_path_buf(),
        source,
    })
}
