use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation throttled: {0}")]
    Throttled(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome classification for a single external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The callee signalled quota exhaustion (HTTP 429 or equivalent).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other transport or service failure.
    #[error("service error: {0}")]
    Service(String),
}

impl From<BedrockError> for CallError {
    fn from(e: BedrockError) -> Self {
        match e {
            BedrockError::Throttled(msg) => CallError::RateLimited(msg),
            other => CallError::Service(other.to_string()),
        }
    }
}

/// Failure surfaced by the rate limiter to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("rate limited after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    #[error("service error: {0}")]
    Service(String),
}
