/// Error types for the sample documentation contract.
///
/// The four domain kinds map onto how a sample can break the contract: the
/// README does not have the expected shape (`Parse`), a section exists but is
/// badly formatted (`Format`), derived and persisted data disagree
/// (`Consistency`), or the folder lacks required files (`NotFound`).
/// File-system and JSON failures are kept separate so callers can tell a
/// broken sample from a broken checkout.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Consistency(String),

    #[error("{0}")]
    NotFound(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("metadata record does not match the schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("failed to encode metadata record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ContractError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short label for the error kind, used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Format(_) => "format",
            Self::Consistency(_) => "consistency",
            Self::NotFound(_) => "not_found",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Schema(_) => "schema",
            Self::Encode(_) => "encode",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_decode_and_encode_failures_are_distinct() {
        let schema = ContractError::Schema(json_error());
        assert!(schema.to_string().starts_with("metadata record does not match the schema"));
        assert_eq!(schema.kind(), "schema");

        let encode = ContractError::Encode(json_error());
        assert!(encode.to_string().starts_with("failed to encode metadata record"));
        assert_eq!(encode.kind(), "encode");
    }
}
