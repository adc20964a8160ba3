/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gateway client operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Request rejected before any network I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gateway or transport rejected the call
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// No response within the configured bound
    #[error("Gateway timeout: {0}")]
    Timeout(String),

    /// Unknown gateway name
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Helper functions for common error scenarios
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        Error::Gateway(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Error::Timeout(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Error::NotFound(resource.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Timeouts are surfaced distinctly so callers can decide about
    /// retrying idempotent operations themselves
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
