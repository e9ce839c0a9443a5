/// Folder introspection: the metadata fields that come from a sample's file listing.
use std::path::Path;

use tracing::warn;

use crate::error::{ContractError, Result};

const IMAGE_EXTENSIONS: &[&str] = &["png", "gif"];

/// Immediate entries of a sample folder, by file name. No recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    pub entries: Vec<String>,
}

/// Whether an empty image list is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    /// Checking an existing sample: screenshots must be present.
    Required,
    /// Generating a record for a new sample, possibly before screenshots exist.
    Optional,
}

/// `images` and `snippets` as derived from a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFields {
    pub images: Vec<String>,
    pub snippets: Vec<String>,
}

impl FolderListing {
    pub fn read(folder: &Path) -> Result<Self> {
        let dir = std::fs::read_dir(folder).map_err(|e| ContractError::io(folder, e))?;
        let mut entries = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| ContractError::io(folder, e))?;
            match entry.file_name().into_string() {
                Ok(name) => entries.push(name),
                Err(name) => {
                    warn!(folder = %folder.display(), entry = ?name, "skipping non-UTF-8 file name");
                }
            }
        }
        Ok(Self { entries })
    }

    #[cfg(test)]
    pub(crate) fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// PNG and GIF files (extension compared case-insensitively), sorted.
    pub fn images(&self) -> Vec<String> {
        self.collect_sorted(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
    }

    /// Files with exactly `extension` (case-sensitive), sorted.
    pub fn snippets(&self, extension: &str) -> Vec<String> {
        self.collect_sorted(|ext| ext == extension)
    }

    /// True when every entry starts with `ignored_prefix`; git does not keep such folders.
    pub fn is_effectively_empty(&self, ignored_prefix: &str) -> bool {
        self.entries.iter().all(|name| name.starts_with(ignored_prefix))
    }

    fn collect_sorted(&self, keep: impl Fn(&str) -> bool) -> Vec<String> {
        let mut found: Vec<String> = self
            .entries
            .iter()
            .filter(|name| extension(name).is_some_and(&keep))
            .cloned()
            .collect();
        found.sort();
        found
    }
}

/// Derive `images` and `snippets` from a listing.
pub fn derive_from_paths(
    listing: &FolderListing,
    snippet_extension: &str,
    images: ImageRequirement,
) -> Result<PathFields> {
    let image_files = listing.images();
    if image_files.is_empty() && images == ImageRequirement::Required {
        return Err(ContractError::not_found("Unable to get images paths."));
    }
    let snippets = listing.snippets(snippet_extension);
    if snippets.is_empty() {
        return Err(ContractError::not_found(format!(
            "Unable to get {snippet_extension} source code paths."
        )));
    }
    Ok(PathFields {
        images: image_files,
        snippets,
    })
}

/// Extension of a file name. A leading dot alone (`.png`) does not count.
fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn listing() -> FolderListing {
        FolderListing::from_entries([
            "README.md",
            "README.metadata.json",
            "display-map.PNG",
            "animation.gif",
            ".png",
            "notes.jpg",
            "DisplayMapView.swift",
            "Helper.SWIFT",
            "App.swift",
        ])
    }

    #[test]
    fn test_images_case_insensitive_sorted() {
        assert_eq!(listing().images(), vec!["animation.gif", "display-map.PNG"]);
    }

    #[test]
    fn test_snippets_case_sensitive_sorted() {
        assert_eq!(
            listing().snippets("swift"),
            vec!["App.swift", "DisplayMapView.swift"]
        );
    }

    #[test]
    fn test_derive_from_paths() {
        let fields = derive_from_paths(&listing(), "swift", ImageRequirement::Required).unwrap();
        assert_eq!(fields.images.len(), 2);
        assert_eq!(fields.snippets.len(), 2);
    }

    #[test]
    fn test_derive_from_paths_missing_images() {
        let listing = FolderListing::from_entries(["README.md", "App.swift"]);
        let err = derive_from_paths(&listing, "swift", ImageRequirement::Required).unwrap_err();
        assert!(matches!(err, ContractError::NotFound(_)));

        let fields = derive_from_paths(&listing, "swift", ImageRequirement::Optional).unwrap();
        assert!(fields.images.is_empty());
        assert_eq!(fields.snippets, vec!["App.swift"]);
    }

    #[test]
    fn test_derive_from_paths_missing_snippets() {
        let listing = FolderListing::from_entries(["README.md", "map.png"]);
        let err = derive_from_paths(&listing, "swift", ImageRequirement::Optional).unwrap_err();
        assert!(matches!(err, ContractError::NotFound(_)));
    }

    #[test]
    fn test_is_effectively_empty() {
        assert!(FolderListing::default().is_effectively_empty(".DS_Store"));
        assert!(FolderListing::from_entries([".DS_Store"]).is_effectively_empty(".DS_Store"));
        assert!(!listing().is_effectively_empty(".DS_Store"));
    }

    #[test]
    fn test_read_listing_from_disk() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("map.png"), b"").unwrap();
        std::fs::write(temp.path().join("App.swift"), b"").unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("nested").join("deep.swift"), b"").unwrap();

        let listing = FolderListing::read(temp.path()).unwrap();
        assert_eq!(listing.images(), vec!["map.png"]);
        assert_eq!(listing.snippets("swift"), vec!["App.swift"]);
    }

    #[test]
    fn test_read_missing_folder() {
        let temp = tempdir().unwrap();
        let err = FolderListing::read(&temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, ContractError::Io { .. }));
    }
}
