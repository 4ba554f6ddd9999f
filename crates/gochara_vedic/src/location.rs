//! Geographic observer location.

use serde::{Deserialize, Serialize};

/// Observer position on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above mean sea level in metres.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Reject coordinates outside their geographic range.
    ///
    /// The poles themselves are excluded: the ascendant is undefined there.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() >= 90.0 {
            return Err("latitude_deg must be in (-90, 90)");
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err("longitude_deg must be in [-180, 180]");
        }
        if !self.altitude_m.is_finite() {
            return Err("altitude_m must be finite");
        }
        Ok(())
    }
}
