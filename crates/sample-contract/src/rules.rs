/// The fixed battery of README and metadata format rules.
///
/// Every rule is a pure function that returns the first violation it finds.
/// Rules do not depend on each other; callers decide whether to stop at the
/// first failure or run them all.
use std::collections::BTreeSet;

use crate::constants::{is_category, is_proper_noun, AVAILABLE_HEADERS, ESSENTIAL_HEADERS};
use crate::error::{ContractError, Result};
use crate::parser::strip_bullet;
use crate::text::{
    is_capitalized, is_casefold_sorted, is_lowercase, is_uppercase, subsequence_mismatch,
};

/// Section headers must be known, complete, unique and in canonical order.
pub fn check_headings(headers: &[String]) -> Result<()> {
    let found: BTreeSet<&str> = headers.iter().map(String::as_str).collect();

    let unexpected: Vec<&str> = found
        .iter()
        .copied()
        .filter(|h| !AVAILABLE_HEADERS.contains(h))
        .collect();
    if !unexpected.is_empty() {
        return Err(ContractError::format(format!(
            "Unexpected header or extra whitespace - {}.",
            quote_list(&unexpected)
        )));
    }

    let missing: Vec<&str> = ESSENTIAL_HEADERS
        .iter()
        .copied()
        .filter(|h| !found.contains(h))
        .collect();
    if !missing.is_empty() {
        return Err(ContractError::format(format!(
            "Missing essential header(s) - {}.",
            quote_list(&missing)
        )));
    }

    if found.len() != headers.len() {
        let mut seen = BTreeSet::new();
        let repeated: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .filter(|h| !seen.insert(*h))
            .collect();
        return Err(ContractError::format(format!(
            "Repeated header(s) - {}.",
            quote_list(&repeated)
        )));
    }

    let remaining = subsequence_mismatch(headers, AVAILABLE_HEADERS);
    if remaining != 0 {
        return Err(ContractError::format(format!(
            "Wrong order at - \"{}\".",
            headers[remaining - 1]
        )));
    }
    Ok(())
}

/// Title must be in sentence case, allowing the listed proper nouns.
///
/// - "Display a map" passes
/// - "display a map" fails (first word)
/// - "Display a Map" fails (`Map` is neither lower- nor uppercase)
/// - "Add an OpenStreetMap layer" passes (`OpenStreetMap` is listed)
pub fn check_sentence_case(title: &str) -> Result<()> {
    if is_proper_noun(title) {
        return Ok(());
    }
    let mut words = title.split_whitespace();
    let Some(first) = words.next() else {
        return Err(ContractError::format("Empty title string."));
    };

    let starts_upper = first
        .chars()
        .next()
        .is_some_and(|c| c.to_uppercase().eq(std::iter::once(c)));
    if !starts_upper && !is_uppercase(first) && !is_proper_noun(first) {
        return Err(ContractError::format(
            "Wrong letter case for the first word in title.",
        ));
    }

    for word in words {
        let word = word.trim_matches(['(', ')']);
        if !is_lowercase(word) && !is_uppercase(word) && !is_proper_noun(word) {
            return Err(ContractError::format(format!(
                "Wrong letter case for word: \"{word}\" in title."
            )));
        }
    }
    Ok(())
}

/// Check the `Relevant API` body and return the set of APIs.
///
/// APIs must have no backticks, no blank entries, no duplicates, and be
/// sorted case-insensitively.
pub fn check_apis(body: &str) -> Result<BTreeSet<String>> {
    let lines: Vec<&str> = body.trim().lines().collect();
    if lines.is_empty() {
        return Err(ContractError::parse("Empty Relevant APIs."));
    }

    let mut apis = Vec::with_capacity(lines.len());
    for line in &lines {
        let api = strip_bullet(line);
        if api.contains('`') {
            return Err(ContractError::format("API should not include backticks."));
        }
        apis.push(api);
    }

    let set: BTreeSet<String> = apis.iter().cloned().collect();
    if set.contains("") {
        return Err(ContractError::format("Empty line in APIs."));
    }
    if set.len() < apis.len() {
        return Err(ContractError::format("Duplicate APIs."));
    }
    if !is_casefold_sorted(&apis) {
        return Err(ContractError::format("APIs are not sorted."));
    }
    Ok(set)
}

/// Check the `Tags` body and return the set of tags.
///
/// Each tag must be lowercase, UPPERCASE, Capitalized or a listed proper noun.
/// Joining the tags with `", "` must give back the trimmed body exactly.
pub fn check_tags(body: &str) -> Result<BTreeSet<String>> {
    if body.trim().is_empty() {
        return Err(ContractError::parse("Empty tags."));
    }

    let mut tags = Vec::new();
    for raw in body.split(',') {
        let tag = raw.trim();
        if !is_lowercase(tag) && !is_uppercase(tag) && !is_capitalized(tag) && !is_proper_noun(tag)
        {
            return Err(ContractError::format(format!(
                "Wrong letter case for tag: \"{tag}\"."
            )));
        }
        tags.push(tag.to_string());
    }

    let set: BTreeSet<String> = tags.iter().cloned().collect();
    if set.contains("") {
        return Err(ContractError::format("Empty char in tags."));
    }
    if tags.join(", ") != body.trim() {
        return Err(ContractError::format("Extra whitespaces in tags."));
    }
    if set.len() < tags.len() {
        return Err(ContractError::format("Duplicate tags."));
    }
    if !is_casefold_sorted(&tags) {
        return Err(ContractError::format("Tags are not sorted."));
    }
    Ok(set)
}

/// An API must never also be listed as a plain tag.
pub fn check_disjoint(apis: &BTreeSet<String>, tags: &BTreeSet<String>) -> Result<()> {
    let overlap: Vec<&str> = apis.intersection(tags).map(String::as_str).collect();
    if !overlap.is_empty() {
        return Err(ContractError::format(format!(
            "API should not be in tags - {}.",
            quote_list(&overlap)
        )));
    }
    Ok(())
}

/// Category must be set and be one of the fixed categories.
pub fn check_category(category: &str) -> Result<()> {
    if category.is_empty() {
        return Err(ContractError::consistency("Missing category."));
    }
    if !is_category(category) {
        return Err(ContractError::consistency(format!(
            "Invalid category - \"{category}\"."
        )));
    }
    Ok(())
}

fn quote_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
