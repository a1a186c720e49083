//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid layout configuration, the generation/scoring preconditions (palette, seed word,
//! path set), malformed path identifiers, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("seed word is missing or blank")]
    MissingWord,

    #[error("color palette is missing or empty")]
    MissingColors,

    #[error("cannot score an empty path set")]
    EmptyPathSet,

    #[error("invalid path id '{id}'")]
    InvalidPathId { id: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns true for errors caused by a malformed generation request, i.e. the ones a
    /// transport layer reports as a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingWord | Error::MissingColors | Error::EmptyPalette
        )
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
