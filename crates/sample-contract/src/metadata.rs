/// Metadata consistency checker and generator.
///
/// Checking derives a record from the README and folder listing, reconciles
/// it with `README.metadata.json` and reports any remaining difference.
/// Generating writes the derived record next to the authoritative one.
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::ContractConfig;
use crate::error::{ContractError, Result};
use crate::folder::{derive_from_paths, FolderListing, ImageRequirement};
use crate::model::{derive_from_readme, SampleMetadata};
use crate::parser::Document;
use crate::report::{Finding, Rule};
use crate::rules::check_category;
use crate::sample::{read_json, read_text, SampleFolder};

/// Derive a metadata record for `sample` from its README and file listing.
pub fn derive_metadata(
    sample: &SampleFolder,
    config: &ContractConfig,
    images: ImageRequirement,
) -> Result<SampleMetadata> {
    let content = read_text(&sample.readme_path(config))?;
    let document = Document::parse(&content);
    let readme = derive_from_readme(&document, &sample.name)?;

    let listing = FolderListing::read(&sample.path)?;
    let paths = derive_from_paths(&listing, &config.snippet_extension, images)?;

    Ok(SampleMetadata::derived(readme, paths))
}

/// Check that the persisted record of `sample` matches what its README and files imply.
///
/// Derivation and loading failures end the check early. Otherwise both the
/// consistency diff and the category rule are evaluated.
pub fn check_metadata(sample: &SampleFolder, config: &ContractConfig) -> Vec<Finding> {
    let derived = match derive_metadata(sample, config, ImageRequirement::Required) {
        Ok(derived) => derived,
        Err(e) => return vec![Finding::new(Rule::Populate, e)],
    };

    let persisted = match read_json(&sample.metadata_path(config)) {
        Ok(persisted) => persisted,
        Err(e) => return vec![Finding::new(Rule::Load, e)],
    };

    let mut findings = Vec::new();
    if let Err(e) = derived.diff_against(&persisted) {
        findings.push(Finding::new(Rule::Metadata, e));
    }

    let category = persisted
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if let Err(e) = check_category(category) {
        findings.push(Finding::new(Rule::Category, e));
    }

    debug!(sample = %sample, findings = findings.len(), "metadata checked");
    findings
}

/// Write the derived record for `sample` to the generated metadata file.
///
/// Missing screenshots are tolerated so a record can be drafted early.
/// Returns the path written.
pub fn create_metadata(sample: &SampleFolder, config: &ContractConfig) -> Result<PathBuf> {
    let derived = derive_metadata(sample, config, ImageRequirement::Optional)?;
    let text = derived.to_canonical_form()?;

    let path = sample.generated_metadata_path(config);
    std::fs::write(&path, text).map_err(|e| ContractError::io(&path, e))?;
    info!(sample = %sample, path = %path.display(), "wrote derived metadata");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::tempdir;

    const README: &str = "# Display map

Display a map with an imagery basemap.

![Image of display map](display-map.png)

## Use case

x

## How to use the sample

x

## How it works

x

## Relevant API

* Map
* MapView

## Tags

basemap, map
";

    fn write_sample(root: &Path, metadata: Option<Value>) -> SampleFolder {
        let folder = root.join("Display map");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("README.md"), README).unwrap();
        std::fs::write(folder.join("display-map.png"), b"").unwrap();
        std::fs::write(folder.join("DisplayMapView.swift"), b"").unwrap();
        std::fs::write(folder.join("App.swift"), b"").unwrap();
        if let Some(metadata) = metadata {
            std::fs::write(
                folder.join("README.metadata.json"),
                serde_json::to_string_pretty(&metadata).unwrap(),
            )
            .unwrap();
        }
        SampleFolder::new(folder)
    }

    fn record() -> Value {
        json!({
            "category": "Maps",
            "description": "Display a map with an imagery basemap.",
            "ignore": false,
            "images": ["display-map.png"],
            "keywords": ["basemap", "map", "Map", "MapView"],
            "redirect_from": [],
            "relevant_apis": ["Map", "MapView"],
            "snippets": ["DisplayMapView.swift", "App.swift"],
            "title": "Display map"
        })
    }

    #[test]
    fn test_consistent_sample_passes() {
        let temp = tempdir().unwrap();
        let sample = write_sample(temp.path(), Some(record()));
        let findings = check_metadata(&sample, &ContractConfig::default());
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_diff_and_category_both_reported() {
        let temp = tempdir().unwrap();
        let mut metadata = record();
        metadata["category"] = json!("Mapping");
        metadata["images"] = json!(["other.png"]);
        let sample = write_sample(temp.path(), Some(metadata));

        let findings = check_metadata(&sample, &ContractConfig::default());
        let rules: Vec<Rule> = findings.iter().map(|f| f.rule).collect();
        assert_eq!(rules, vec![Rule::Metadata, Rule::Category]);
        assert!(findings[0].to_string().contains("+        \"other.png\""));
    }

    #[test]
    fn test_missing_record_is_a_load_failure() {
        let temp = tempdir().unwrap();
        let sample = write_sample(temp.path(), None);
        let findings = check_metadata(&sample, &ContractConfig::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::Load);
    }

    #[test]
    fn test_folder_title_mismatch_is_a_populate_failure() {
        let temp = tempdir().unwrap();
        let sample = write_sample(temp.path(), Some(record()));
        let renamed = temp.path().join("Display Map");
        std::fs::rename(&sample.path, &renamed).unwrap();

        let findings = check_metadata(&SampleFolder::new(renamed), &ContractConfig::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::Populate);
        assert!(matches!(findings[0].error, ContractError::Consistency(_)));
        assert!(findings[0].to_string().contains("\"Display Map\""));
    }

    #[test]
    fn test_create_metadata_writes_generated_file() {
        let temp = tempdir().unwrap();
        let sample = write_sample(temp.path(), None);
        std::fs::remove_file(sample.path.join("display-map.png")).unwrap();

        let config = ContractConfig::default();
        let path = create_metadata(&sample, &config).unwrap();
        assert_eq!(path, sample.path.join("new-README.metadata.json"));
        assert!(!sample.metadata_path(&config).exists());

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        let written: SampleMetadata = serde_json::from_str(&text).unwrap();
        assert_eq!(written.title, "Display map");
        assert!(written.images.is_empty());
        assert_eq!(written.snippets, vec!["App.swift", "DisplayMapView.swift"]);
        assert_eq!(written.keywords, vec!["basemap", "map", "Map", "MapView"]);
        assert_eq!(written.category, "");
    }
}
