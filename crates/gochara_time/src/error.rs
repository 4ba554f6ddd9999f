//! Error types for civil time handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing or validating civil timestamps.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Timestamp text could not be parsed.
    Parse(String),
    /// A calendar field is outside its valid range.
    InvalidField(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "time parse error: {msg}"),
            Self::InvalidField(msg) => write!(f, "invalid time field: {msg}"),
        }
    }
}

impl Error for TimeError {}
