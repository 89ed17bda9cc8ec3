use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid backend base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("Page size for '{0}' must be at least 1")]
    PageSize(&'static str),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(String),
}

impl BackendError {
    /// Message suitable for a user-facing notice
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Status { message, .. } => message.clone(),
            BackendError::Transport(_) => "Network error, or server is down".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a campaign first.")]
    NoCampaignSelected,

    #[error("{0}")]
    MissingField(String),

    #[error("Please pick valid From and To dates.")]
    InvalidDate,

    #[error("From Date must be in year {0}.")]
    FromDateYear(i32),

    #[error("To Date cannot be earlier than From Date.")]
    DateOrder,

    #[error("Level must be a whole number between 1 and 5.")]
    Level,

    #[error("{field} must be a number between {min} and {max}.")]
    MarksRange { field: String, min: u32, max: u32 },

    #[error("Start marks cannot exceed end marks.")]
    MarksOrder,

    #[error("{0} must be a whole number.")]
    NotAnInteger(String),

    #[error("Cannot jump to step '{0}' before reaching it.")]
    StepLocked(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
