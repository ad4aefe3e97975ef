//! Error types for the mailer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Message error: {0}")]
    Message(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MailerError {
    fn from(err: serde_json::Error) -> Self {
        MailerError::Serialization(err.to_string())
    }
}
