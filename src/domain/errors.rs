//! Domain parsing errors.

use std::fmt;

/// Errors that can occur when parsing domain values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The name does not match any cached resource class.
    UnknownResource(String),

    /// The name does not match any item include level.
    UnknownInclude(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownResource(name) => write!(f, "Unknown resource: {}", name),
            Self::UnknownInclude(name) => write!(f, "Unknown include: {}", name),
        }
    }
}

impl std::error::Error for ParseError {}
