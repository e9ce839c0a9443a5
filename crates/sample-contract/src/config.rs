/// File names and extensions that define what a sample folder looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// README file inside each sample folder.
    pub readme_file_name: String,
    /// Authoritative metadata record inside each sample folder.
    pub metadata_file_name: String,
    /// Where `create` writes a derived record, so the authoritative one is never overwritten.
    pub generated_metadata_file_name: String,
    /// Source-code extension (without the dot) collected into `snippets`. Case-sensitive.
    pub snippet_extension: String,
    /// Name of the directories whose immediate children are samples.
    pub samples_dir_name: String,
    /// Listing entries starting with this prefix do not make a folder non-empty.
    pub ignored_entry_prefix: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            readme_file_name: "README.md".to_string(),
            metadata_file_name: "README.metadata.json".to_string(),
            generated_metadata_file_name: "new-README.metadata.json".to_string(),
            snippet_extension: "swift".to_string(),
            samples_dir_name: "Samples".to_string(),
            ignored_entry_prefix: ".DS_Store".to_string(),
        }
    }
}
