//! Error types for the quiz core.
//!
//! Only failures of the external collaborators are typed: a question-service
//! failure aborts starting a quiz, a transport failure aborts whatever send
//! was in flight. Unparseable selections and events for unknown participants
//! are recovered where they occur and never become errors.

use thiserror::Error;

/// The question service could not deliver questions or accept results.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service was unreachable or timed out.
    #[error("question service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a failure status.
    #[error("question service returned HTTP {0}")]
    Status(u16),

    /// The service answered, but the payload did not decode.
    #[error("malformed question service payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Unavailable(err.to_string())
        }
    }
}

/// Delivering an outbound message to the chat transport failed.
#[derive(Debug, Error)]
#[error("transport send failed: {0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }
}

/// Anything that can abort handling one inbound event.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
