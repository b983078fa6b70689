//! recap - Meeting transcript summaries powered by an LLM
//!
//! Turns a transcript into a title, an agenda, and a list of action items,
//! and ships a small judge-based evaluation harness alongside.

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod judge;
pub mod llm;
pub mod summary;

use thiserror::Error;

/// Main error type for recap
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("LLM completion failed: {message}")]
    CompletionFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Malformed LLM response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecapError {
    /// A completion failure with no underlying error value.
    pub fn completion(message: impl Into<String>) -> Self {
        Self::CompletionFailure {
            message: message.into(),
            source: None,
        }
    }

    /// A completion failure wrapping the error that caused it.
    pub fn completion_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CompletionFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecapError>;

/// Application name
pub const APP_NAME: &str = "recap";
