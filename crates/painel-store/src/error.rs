use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No known identity holds the presented token.
    #[error("Unknown identity")]
    UnknownIdentity,

    /// The project or task does not exist under this identity. Malformed
    /// identifiers end up here as well.
    #[error("Resource not found")]
    NotFound,

    /// A checkbox field carried something other than `""` or `"on"`.
    #[error("Invalid value for 'finished': {0:?}")]
    InvalidCompletion(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
