use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{HEADER_RELEVANT_API, HEADER_TAGS};
use crate::error::{ContractError, Result};
use crate::folder::PathFields;
use crate::parser::{parse_apis, parse_tags, parse_title_block, Document};
use crate::text::{line_diff, strip_special_chars};

/// Metadata record of one sample (`README.metadata.json`).
///
/// Fields are declared in key order so the serialized form is already
/// canonical; [`canonical_json`] sorts again for records read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMetadata {
    /// One of the fixed categories. Authored by hand, never derived.
    pub category: String,
    /// Second line of the README title block.
    pub description: String,
    /// Authored by hand, never derived.
    pub ignore: bool,
    /// PNG/GIF files in the sample folder, sorted.
    pub images: Vec<String>,
    /// Tags that are not APIs, followed by every API.
    pub keywords: Vec<String>,
    /// Portal item IDs the sample downloads. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offline_data: Vec<String>,
    /// Authored by hand, never derived.
    pub redirect_from: Vec<String>,
    /// Entries of the README `Relevant API` section.
    pub relevant_apis: Vec<String>,
    /// Source files in the sample folder.
    pub snippets: Vec<String>,
    /// Must equal the sample folder name.
    pub title: String,
}

/// The four fields that can be computed from a README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeFields {
    pub title: String,
    pub description: String,
    pub relevant_apis: Vec<String>,
    pub keywords: Vec<String>,
}

/// Derive title, description, APIs and keywords from a parsed README.
///
/// The README title must match `folder_name` exactly.
pub fn derive_from_readme(document: &Document, folder_name: &str) -> Result<ReadmeFields> {
    let head = parse_title_block(document.title_block())?;
    if head.title != folder_name {
        return Err(ContractError::consistency(format!(
            "Folder name incorrect: \"{folder_name}\""
        )));
    }

    let relevant_apis = parse_apis(document.require_section(HEADER_RELEVANT_API)?)?;
    let tags = parse_tags(document.require_section(HEADER_TAGS)?)?;

    let mut keywords: Vec<String> = tags
        .into_iter()
        .filter(|tag| !relevant_apis.contains(tag))
        .collect();
    keywords.extend(relevant_apis.iter().cloned());

    Ok(ReadmeFields {
        title: head.title,
        description: head.description,
        relevant_apis,
        keywords,
    })
}

impl SampleMetadata {
    /// Assemble a freshly derived record. Non-derivable fields take their defaults.
    pub fn derived(readme: ReadmeFields, paths: PathFields) -> Self {
        Self {
            title: readme.title,
            description: readme.description,
            relevant_apis: readme.relevant_apis,
            keywords: readme.keywords,
            images: paths.images,
            snippets: paths.snippets,
            ..Self::default()
        }
    }

    /// Canonical JSON text of this record.
    pub fn to_canonical_form(&self) -> Result<String> {
        let value = serde_json::to_value(self).map_err(ContractError::Encode)?;
        canonical_json(&value)
    }

    /// Compare this derived record with the persisted one.
    ///
    /// The persisted value is the whole JSON object read from disk, so keys
    /// the schema does not know about also surface as differences.
    pub fn diff_against(&self, persisted: &Value) -> Result<()> {
        let record: SampleMetadata =
            serde_json::from_value(persisted.clone()).map_err(ContractError::Schema)?;

        let reconciled = reconcile(self, &record);
        let derived = reconciled.to_canonical_form()?;
        let original = canonical_json(persisted)?;
        if derived != original {
            let diff = line_diff(&derived, &original, "derived", "persisted");
            return Err(ContractError::consistency(format!(
                "Derived metadata differs from the persisted record for \"{}\"\n{diff}",
                self.title
            )));
        }
        Ok(())
    }
}

/// Merge the persisted record into a derived one before comparison.
///
/// - `category`, `redirect_from` and `offline_data` always come from `persisted`.
/// - The persisted `description` wins when it equals the derived one with
///   special characters stripped.
/// - The persisted `snippets` order wins when it holds the same files.
pub fn reconcile(derived: &SampleMetadata, persisted: &SampleMetadata) -> SampleMetadata {
    let stripped = strip_special_chars(&derived.description);
    let description = if persisted.description == stripped {
        if persisted.description != derived.description {
            debug!(title = %derived.title, "accepting description without special characters");
        }
        persisted.description.clone()
    } else {
        derived.description.clone()
    };

    let mut persisted_snippets = persisted.snippets.clone();
    persisted_snippets.sort();
    let snippets = if persisted_snippets == derived.snippets {
        persisted.snippets.clone()
    } else {
        derived.snippets.clone()
    };

    SampleMetadata {
        category: persisted.category.clone(),
        redirect_from: persisted.redirect_from.clone(),
        offline_data: persisted.offline_data.clone(),
        description,
        snippets,
        ..derived.clone()
    }
}

/// Serialize a JSON value with sorted keys, 4-space indentation and a trailing newline.
pub fn canonical_json(value: &Value) -> Result<String> {
    let normalized = normalize_json_value(value.clone());
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    normalized
        .serialize(&mut serializer)
        .map_err(ContractError::Encode)?;
    let mut text = String::from_utf8_lossy(&buf).into_owned();
    text.push('\n');
    Ok(text)
}

fn normalize_json_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_json_value(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json_value).collect()),
        other => other,
    }
}
