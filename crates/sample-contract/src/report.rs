/// Findings: rule violations tagged with the check that produced them.
use std::fmt;

use crate::error::ContractError;

/// Which check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Load,
    FileName,
    Header,
    Title,
    Apis,
    Tags,
    RedundantTags,
    Populate,
    Metadata,
    Category,
}

impl Rule {
    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "loading file",
            Self::FileName => "file name",
            Self::Header => "header",
            Self::Title => "title",
            Self::Apis => "APIs",
            Self::Tags => "tags",
            Self::RedundantTags => "redundant tags",
            Self::Populate => "populate",
            Self::Metadata => "inconsistent metadata",
            Self::Category => "category",
        }
    }
}

/// One rule violation in one sample.
#[derive(Debug)]
pub struct Finding {
    pub rule: Rule,
    pub error: ContractError,
}

impl Finding {
    pub fn new(rule: Rule, error: ContractError) -> Self {
        Self { rule, error }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {} - {}", self.rule.label(), self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(Rule::Apis, ContractError::format("Duplicate APIs."));
        assert_eq!(finding.to_string(), "Error APIs - Duplicate APIs.");

        let finding = Finding::new(Rule::Category, ContractError::consistency("Missing category."));
        assert_eq!(finding.to_string(), "Error category - Missing category.");
    }
}
