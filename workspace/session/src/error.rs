use thiserror::Error;

/// Coarse classification of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout, or a non-success HTTP status.
    Transport,
    /// The service answered but the payload is missing or has ill-typed fields.
    MalformedResponse,
}

/// Error types for one prediction request/response exchange
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// No response arrived within the configured bound
    #[error("Request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The payload could not be turned into a prediction result
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl PredictionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::Transport(_)
            | PredictionError::HttpStatus { .. }
            | PredictionError::Timeout { .. } => ErrorKind::Transport,
            PredictionError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Type alias for Result with PredictionError
pub type Result<T> = std::result::Result<T, PredictionError>;
