use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("Parsing error for parameter '{parameter}': {message}")]
    Parsing { parameter: String, message: String },

    #[error("Invalid value '{value}' for parameter '{parameter}', expected {domain}")]
    Validation {
        parameter: String,
        value: String,
        domain: String,
    },

    #[error("Unknown strategy '{value}' for slot '{slot}'")]
    UnknownStrategy { slot: String, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evaluation failure: {0}")]
    EvaluationFailure(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MetaError>;
