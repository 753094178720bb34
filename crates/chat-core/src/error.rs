//! Error Types

use thiserror::Error;

/// Result type alias for chat client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Chat client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend unreachable, DNS failure, aborted connection
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success HTTP status
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// Response body failed while being read
    #[error("Stream error: {0}")]
    Stream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Stream(_) => true,
            ClientError::Status(code) => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => "⚠ Could not reach the assistant. Check your connection.".into(),
            ClientError::Status(code) => format!("⚠ The assistant answered with an error (HTTP {code})."),
            ClientError::Stream(_) => "⚠ The reply was interrupted.".into(),
            ClientError::Json(_) => "⚠ The assistant sent a reply that could not be read.".into(),
            ClientError::Config(msg) => format!("⚠ Client misconfigured: {msg}"),
            ClientError::Other(_) => "⚠ An unexpected error occurred.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ClientError::Transport("refused".into()).is_retryable());
        assert!(ClientError::Status(503).is_retryable());
        assert!(!ClientError::Status(404).is_retryable());
        assert!(!ClientError::Config("bad".into()).is_retryable());
    }

    #[test]
    fn test_user_message_mentions_status() {
        assert!(ClientError::Status(500).user_message().contains("500"));
    }
}
