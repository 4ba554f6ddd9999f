//! Error type for transit search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gochara_ephem::EphemError;

/// Solver phase in which a search gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolvePhase {
    /// Coarse scan looking for a sign change.
    Bracketing,
    /// Newton/bisection inside a found bracket.
    Refining,
}

impl Display for SolvePhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bracketing => f.write_str("bracketing"),
            Self::Refining => f.write_str("refining"),
        }
    }
}

/// Errors from transit search.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TransitError {
    /// The position provider failed (out of range, missing data). Never retried.
    Computation(EphemError),
    /// Iteration budget exhausted.
    Convergence {
        phase: SolvePhase,
        iterations: u32,
        /// Last |circular distance| to the target, degrees.
        residual_deg: f64,
    },
    /// The ephemeris session was closed.
    ClosedResource,
    InvalidConfig(&'static str),
}

impl Display for TransitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computation(e) => write!(f, "position computation failed: {e}"),
            Self::Convergence {
                phase,
                iterations,
                residual_deg,
            } => write!(
                f,
                "no convergence while {phase} after {iterations} iterations (residual {residual_deg:.3e} deg)"
            ),
            Self::ClosedResource => f.write_str("ephemeris session is closed"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for TransitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Computation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EphemError> for TransitError {
    fn from(e: EphemError) -> Self {
        match e {
            EphemError::Closed => Self::ClosedResource,
            other => Self::Computation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_maps_to_closed_resource() {
        assert_eq!(TransitError::from(EphemError::Closed), TransitError::ClosedResource);
    }

    #[test]
    fn range_maps_to_computation() {
        let e = TransitError::from(EphemError::OutOfRange { jd_ut: 1.0 });
        assert!(matches!(e, TransitError::Computation(EphemError::OutOfRange { .. })));
        assert!(e.source().is_some());
    }

    #[test]
    fn convergence_message_names_phase() {
        let e = TransitError::Convergence {
            phase: SolvePhase::Refining,
            iterations: 100,
            residual_deg: 2.5e-3,
        };
        let msg = e.to_string();
        assert!(msg.contains("refining") && msg.contains("100"), "{msg}");
    }
}
