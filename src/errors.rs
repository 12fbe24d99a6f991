use std::result::Result as StdResult;

use thiserror::Error;

/// Failures raised by storage and configuration layers.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Input(#[from] InputError),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

/// Rejections produced at the input boundary, before anything reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("amount is required")]
    MissingAmount,
    #[error("amount `{0}` is not a number")]
    NonNumericAmount(String),
    #[error("amount must be greater than zero (got `{0}`)")]
    NonPositiveAmount(String),
    #[error("category is required")]
    MissingCategory,
    #[error("type is required (income or expense)")]
    MissingType,
    #[error("type `{0}` is not income or expense")]
    InvalidType(String),
}
