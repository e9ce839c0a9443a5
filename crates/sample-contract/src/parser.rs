/// Section parser for sample READMEs.
///
/// A README has a deterministic structure:
/// - Title block: `# Title`, a one-paragraph description, then image references
/// - Sections: `## Header` followed by free text until the next `## ` line or EOF
///
/// Only level-2 headings split sections. `#`, `###` and deeper headings stay
/// inside whatever section they appear in.
use regex::Regex;

use crate::error::{ContractError, Result};
use crate::text::sort_casefold;

/// A README split into sections.
///
/// `bodies[0]` is the title block; `bodies[i]` for `i >= 1` is the text that
/// follows `headers[i - 1]`. There is always exactly one more body than there
/// are headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bodies: Vec<String>,
    pub headers: Vec<String>,
}

/// Title and description from the title block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBlock {
    pub title: String,
    pub description: String,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        // Exactly two `#`, one space, header text to end of line.
        let section_header_re = Regex::new(r"(?m)^## (.*)$").expect("valid regex");

        let mut bodies = Vec::new();
        let mut headers = Vec::new();
        let mut body_start = 0;

        for caps in section_header_re.captures_iter(content) {
            let (Some(whole), Some(header)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            bodies.push(content[body_start..whole.start()].to_string());
            headers.push(header.as_str().to_string());
            body_start = whole.end();
        }
        bodies.push(content[body_start..].to_string());

        Self { bodies, headers }
    }

    /// The pre-amble before the first section header.
    pub fn title_block(&self) -> &str {
        self.bodies.first().map(String::as_str).unwrap_or_default()
    }

    /// Body of the first section titled exactly `header`, if present.
    pub fn section(&self, header: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == header)?;
        self.bodies.get(index + 1).map(String::as_str)
    }

    /// Like [`Document::section`], but a missing section is a parse error.
    pub fn require_section(&self, header: &str) -> Result<&str> {
        self.section(header)
            .ok_or_else(|| ContractError::parse(format!("Missing section - \"{header}\".")))
    }
}

/// Extract title and description from the title block.
///
/// Blank lines are skipped; at least three lines must remain (title,
/// description and at least one image reference).
pub fn parse_title_block(block: &str) -> Result<TitleBlock> {
    let lines: Vec<&str> = block.lines().filter(|line| !line.is_empty()).collect();
    if lines.len() < 3 {
        return Err(ContractError::parse("README description parse failure!"));
    }
    let title = lines[0]
        .trim_start_matches(['#', ' '])
        .trim_end()
        .to_string();
    let description = lines[1].trim().to_string();
    Ok(TitleBlock { title, description })
}

/// Split the `Relevant API` body into API names, sorted case-insensitively.
pub fn parse_apis(body: &str) -> Result<Vec<String>> {
    let mut apis: Vec<String> = body
        .lines()
        .filter(|line| !line.is_empty())
        .map(strip_bullet)
        .collect();
    if apis.is_empty() {
        return Err(ContractError::parse("README Relevant API parse failure!"));
    }
    sort_casefold(&mut apis);
    Ok(apis)
}

/// Split the comma-separated `Tags` body into tags, sorted case-insensitively.
pub fn parse_tags(body: &str) -> Result<Vec<String>> {
    if body.trim().is_empty() {
        return Err(ContractError::parse("README Tags parse failure!"));
    }
    let mut tags: Vec<String> = body.split(',').map(|tag| tag.trim().to_string()).collect();
    sort_casefold(&mut tags);
    Ok(tags)
}

/// Drop list bullets (`*`, `-`) and surrounding whitespace from an API line.
pub(crate) fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['*', '-', ' ']).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const README: &str = "# Display map

Display a map with an imagery basemap.

![Image of display map](display-map.png)

## Use case

The map is the most fundamental building block.

### Not a section

Still part of use case.

## How to use the sample

Run the sample to view the map.

## How it works

1. Create a `Map`.

## Relevant API

* Map
* MapView

## Tags

basemap, map
";

    #[test]
    fn test_parse_sections() {
        let doc = Document::parse(README);
        assert_eq!(
            doc.headers,
            vec![
                "Use case",
                "How to use the sample",
                "How it works",
                "Relevant API",
                "Tags"
            ]
        );
        assert_eq!(doc.bodies.len(), doc.headers.len() + 1);
        assert!(doc.title_block().starts_with("# Display map"));
        assert!(doc.section("Use case").unwrap().contains("### Not a section"));
        assert_eq!(doc.section("Tags").unwrap(), "\n\nbasemap, map\n");
        assert!(doc.section("Offline data").is_none());
    }

    #[test]
    fn test_deeper_and_shallower_headings_do_not_split() {
        let doc = Document::parse("# T\n\n### Three\n\n#### Four\n\n##NoSpace\n");
        assert!(doc.headers.is_empty());
        assert_eq!(doc.bodies.len(), 1);
    }

    #[test]
    fn test_header_keeps_trailing_whitespace() {
        let doc = Document::parse("# T\n## Tags \nx\n");
        assert_eq!(doc.headers, vec!["Tags "]);
    }

    #[test]
    fn test_require_section() {
        let doc = Document::parse(README);
        assert!(doc.require_section("Relevant API").is_ok());
        let err = doc.require_section("About the data").unwrap_err();
        assert!(matches!(err, ContractError::Parse(_)));
    }

    #[test]
    fn test_parse_title_block() {
        let block = "# Display map\n\nDisplay a map with...\n\n![](image.png)";
        let head = parse_title_block(block).unwrap();
        assert_eq!(head.title, "Display map");
        assert_eq!(head.description, "Display a map with...");
    }

    #[test]
    fn test_parse_title_block_too_short() {
        let err = parse_title_block("# Display map\n\nOnly a description\n").unwrap_err();
        assert!(matches!(err, ContractError::Parse(_)));
    }

    #[test]
    fn test_parse_apis() {
        let apis = parse_apis("\n\n* MapView\n- Basemap\n* map  \n\n").unwrap();
        assert_eq!(apis, vec!["Basemap", "map", "MapView"]);
    }

    #[test]
    fn test_parse_apis_empty() {
        assert!(matches!(parse_apis("\n\n"), Err(ContractError::Parse(_))));
    }

    #[test]
    fn test_parse_tags() {
        let tags = parse_tags("\n\nNetwork, Data,  tags\n").unwrap();
        assert_eq!(tags, vec!["Data", "Network", "tags"]);
    }

    #[test]
    fn test_parse_tags_empty() {
        assert!(matches!(parse_tags("\n  \n"), Err(ContractError::Parse(_))));
    }
}
