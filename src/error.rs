//! Error handling for the skill-match engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SkillMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for SkillMatchError {
    fn from(err: anyhow::Error) -> Self {
        SkillMatchError::InvalidInput(err.to_string())
    }
}
