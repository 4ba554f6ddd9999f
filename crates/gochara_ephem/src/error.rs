//! Error type for position providers and the ephemeris session.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure to produce a position.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemError {
    /// Instant outside the range the backend covers.
    OutOfRange { jd_ut: f64 },
    /// A required data file is missing or unreadable.
    DataUnavailable(String),
    /// A data file was read but its contents are malformed.
    InvalidData(String),
    /// The session was closed before the query.
    Closed,
    InvalidConfig(&'static str),
}

impl Display for EphemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { jd_ut } => write!(f, "instant out of ephemeris range: JD {jd_ut}"),
            Self::DataUnavailable(msg) => write!(f, "ephemeris data unavailable: {msg}"),
            Self::InvalidData(msg) => write!(f, "invalid ephemeris data: {msg}"),
            Self::Closed => f.write_str("ephemeris session is closed"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for EphemError {}

impl From<std::io::Error> for EphemError {
    fn from(e: std::io::Error) -> Self {
        Self::DataUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EphemError::OutOfRange { jd_ut: 1.5 }.to_string(),
            "instant out of ephemeris range: JD 1.5"
        );
        assert_eq!(EphemError::Closed.to_string(), "ephemeris session is closed");
    }

    #[test]
    fn io_error_maps_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(EphemError::from(io), EphemError::DataUnavailable(_)));
    }
}
