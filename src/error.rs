//! Error types for the BuzzerBeater backend

use thiserror::Error;


pub type Result<T> = std::result::Result<T, BuzzerError>;

#[derive(Error, Debug)]
pub enum BuzzerError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream API returned status code: {status}")]
    UpstreamStatus { status: u16 },

    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("{env_var} environment variable not set")]
    MissingEnv { env_var: String },

    #[error("Failed to parse numeric value: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("{message}")]
    InvalidUpload { message: String },
}

impl BuzzerError {
    /// Errors caused by the statistics API rather than by this service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            BuzzerError::Transport(_) | BuzzerError::UpstreamStatus { .. } | BuzzerError::Decode(_)
        )
    }
}
