pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod folder;
pub mod metadata;
pub mod model;
pub mod parser;
pub mod readme;
pub mod report;
pub mod rules;
pub mod sample;
pub mod text;

pub use config::ContractConfig;
pub use error::{ContractError, Result};
pub use report::{Finding, Rule};
pub use sample::SampleFolder;
