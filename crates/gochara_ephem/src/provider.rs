//! The position provider seam.
//!
//! Everything above this crate (solver, sequence generator, CLI) talks to
//! a `&dyn PositionProvider`. The analytic and tabulated backends, and the
//! [`Ephemeris`](crate::Ephemeris) session wrapping either, implement it.

use crate::body::Body;
use crate::error::EphemError;
use crate::flags::PositionFlags;

/// Geocentric ecliptic position under a flag set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    /// Longitude in degrees, [0, 360).
    pub lon_deg: f64,
    pub lat_deg: f64,
    /// Geocentric distance in AU.
    pub distance_au: f64,
    /// Longitude rate in degrees/day; 0.0 when speed was not requested.
    pub speed_deg_per_day: f64,
}

/// Closed UT Julian Day interval a provider can answer for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub start_jd_ut: f64,
    pub end_jd_ut: f64,
}

impl Coverage {
    pub fn new(start_jd_ut: f64, end_jd_ut: f64) -> Self {
        Self {
            start_jd_ut,
            end_jd_ut,
        }
    }

    pub fn contains(&self, jd_ut: f64) -> bool {
        jd_ut >= self.start_jd_ut && jd_ut <= self.end_jd_ut
    }

    /// `Ok(())` inside the interval, [`EphemError::OutOfRange`] otherwise
    /// (including NaN).
    pub fn check(&self, jd_ut: f64) -> Result<(), EphemError> {
        if self.contains(jd_ut) {
            Ok(())
        } else {
            Err(EphemError::OutOfRange { jd_ut })
        }
    }
}

/// Source of body positions. Implementations are deterministic: the same
/// `(body, jd_ut, flags)` always yields bit-identical output.
pub trait PositionProvider: Send + Sync {
    /// Short backend label for logs.
    fn name(&self) -> &'static str;

    fn coverage(&self) -> Coverage;

    fn position(
        &self,
        body: Body,
        jd_ut: f64,
        flags: PositionFlags,
    ) -> Result<EclipticPosition, EphemError>;

    /// `(longitude, speed)`, the only pair the transit solver needs.
    fn longitude(
        &self,
        body: Body,
        jd_ut: f64,
        flags: PositionFlags,
    ) -> Result<(f64, f64), EphemError> {
        let p = self.position(body, jd_ut, flags)?;
        Ok((p.lon_deg, p.speed_deg_per_day))
    }
}
