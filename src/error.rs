use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Invalid forecast method '{0}': expected one of linear, moving_average, exponential, seasonal")]
    InvalidMethod(String),

    #[error("Invalid forecast horizon: {0}")]
    InvalidHorizon(String),

    #[error("Invalid month key: {0}")]
    InvalidMonth(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
