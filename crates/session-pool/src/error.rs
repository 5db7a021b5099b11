//! Error types for session selection

/// Errors from pool operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no sessions available for model {model}")]
    NoSessionsAvailable { model: String },
}

/// Result alias for pool operations.
pub type Result<T> = std::result::Result<T, Error>;
