/// README format checker.
///
/// Runs every rule against one README and collects all violations, so a
/// single run reports everything that needs fixing in a sample.
use tracing::debug;

use crate::config::ContractConfig;
use crate::constants::{HEADER_RELEVANT_API, HEADER_TAGS};
use crate::parser::{parse_title_block, Document};
use crate::report::{Finding, Rule};
use crate::rules::{check_apis, check_disjoint, check_headings, check_sentence_case, check_tags};
use crate::sample::{read_text, SampleFolder};

/// Run all README rules on a parsed document.
pub fn check_document(document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Err(e) = check_headings(&document.headers) {
        findings.push(Finding::new(Rule::Header, e));
    }

    if let Err(e) = parse_title_block(document.title_block())
        .and_then(|head| check_sentence_case(&head.title))
    {
        findings.push(Finding::new(Rule::Title, e));
    }

    let apis = match document
        .require_section(HEADER_RELEVANT_API)
        .and_then(check_apis)
    {
        Ok(apis) => Some(apis),
        Err(e) => {
            findings.push(Finding::new(Rule::Apis, e));
            None
        }
    };

    let tags = match document.require_section(HEADER_TAGS).and_then(check_tags) {
        Ok(tags) => Some(tags),
        Err(e) => {
            findings.push(Finding::new(Rule::Tags, e));
            None
        }
    };

    match (apis, tags) {
        (Some(apis), Some(tags)) => {
            if let Err(e) = check_disjoint(&apis, &tags) {
                findings.push(Finding::new(Rule::RedundantTags, e));
            }
        }
        _ => debug!("skipping API/tag overlap check after an earlier API or tag failure"),
    }

    findings
}

/// Load the sample's README and run all README rules on it.
pub fn check_readme(sample: &SampleFolder, config: &ContractConfig) -> Vec<Finding> {
    match read_text(&sample.readme_path(config)) {
        Ok(content) => check_document(&Document::parse(&content)),
        Err(e) => vec![Finding::new(Rule::Load, e)],
    }
}
