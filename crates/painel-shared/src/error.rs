use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("Invalid identifier: {0}")]
    Malformed(#[from] uuid::Error),

    #[error("Identifier is not in lowercase hyphenated form")]
    NotCanonical,
}
