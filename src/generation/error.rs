//! Generation backend errors

use thiserror::Error;

/// Error types for generation backends
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered, but not in a shape we understand
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
