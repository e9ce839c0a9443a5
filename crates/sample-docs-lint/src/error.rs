use sample_contract::ContractError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("{failures} error(s) occurred during checking {scope}")]
    ChecksFailed { failures: usize, scope: String },
}
