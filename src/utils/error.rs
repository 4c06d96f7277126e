use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Expected exactly 2 CSV files, got {actual}")]
    InvalidUploadCount { actual: usize },

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Operation '{operation}' is not allowed in state '{state}'")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Analysis response was malformed: {reason}")]
    MalformedResult { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
