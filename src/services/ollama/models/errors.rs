//! Error types for the Ollama client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the Ollama server.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The server did not answer within the request timeout.
    #[error("request timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },

    /// The request could not be sent or its body could not be read
    /// (DNS failure, connection refused, reset, ...).
    #[error("request error: {0}")]
    Request(String),

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("error decoding response body: {0}")]
    Serialization(String),

    /// The HTTP client could not be constructed.
    #[error("config error: {0}")]
    Config(String),
}

impl OllamaError {
    /// Classifies a transport error. Timeouts are checked first so a request
    /// that timed out never ends up as a generic request error.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout {
                duration_secs: timeout.as_secs(),
            }
        } else {
            OllamaError::Request(err.to_string())
        }
    }

    /// The coarse failure class reported to callers of `generate`.
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            OllamaError::Timeout { .. } => GenerationErrorKind::Timeout,
            OllamaError::Request(_) | OllamaError::Api { .. } => {
                GenerationErrorKind::ConnectionError
            }
            OllamaError::Serialization(_) | OllamaError::Config(_) => {
                GenerationErrorKind::UnexpectedError
            }
        }
    }

    /// Display-ready message for a failed generation.
    pub fn user_message(&self) -> String {
        match self.kind() {
            GenerationErrorKind::Timeout => {
                "⏰ Timeout: the model took too long to respond".to_string()
            }
            GenerationErrorKind::ConnectionError => format!("❌ Connection error: {self}"),
            GenerationErrorKind::UnexpectedError => format!("❌ Unexpected error: {self}"),
        }
    }
}

/// Failure class of a generation call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    Timeout,
    ConnectionError,
    UnexpectedError,
}

impl GenerationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationErrorKind::Timeout => "timeout",
            GenerationErrorKind::ConnectionError => "connection_error",
            GenerationErrorKind::UnexpectedError => "unexpected_error",
        }
    }
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
