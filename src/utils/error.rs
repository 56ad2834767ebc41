//! Error handling for the Ring front end

use crate::utils::Location;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Front-end error. Every variant is fatal for the current file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Input Errors ====================

    #[error("Cannot open file: {path} ({message})")]
    Io { path: String, message: String },

    // ==================== Lexical Errors ====================

    #[error("Invalid float at {location}")]
    InvalidFloat { location: Location },

    /// Integer literal outside the `i64` range
    #[error("Invalid number at {location}")]
    InvalidNumber { location: Location },

    #[error("Invalid string at {location}")]
    InvalidString { location: Location },

    #[error("Invalid token at {location}")]
    InvalidToken { location: Location },

    // ==================== Syntax Errors ====================

    #[error("Expected {expected} but found {found} at {location}")]
    ExpectedFound {
        expected: String,
        found: String,
        location: Location,
    },
}

impl Error {
    /// Get the location associated with this error
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::InvalidFloat { location }
            | Self::InvalidNumber { location }
            | Self::InvalidString { location }
            | Self::InvalidToken { location }
            | Self::ExpectedFound { location, .. } => Some(location),
            Self::Io { .. } => None,
        }
    }

    /// Header shown on the first line of a rendered diagnostic
    pub fn title(&self) -> &'static str {
        match self {
            Self::Io { .. } => "<Cannot Open File>",
            Self::InvalidFloat { .. } => "<Invalid Float>",
            Self::InvalidNumber { .. } => "<Invalid Number>",
            Self::InvalidString { .. } => "<Invalid String>",
            Self::InvalidToken { .. } => "<Invalid Token>",
            Self::ExpectedFound { .. } => "<Wrong Token Found>",
        }
    }
}
