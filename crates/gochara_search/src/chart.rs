//! Natal chart model: the fixed frame transits are measured against.

use gochara_ephem::{PositionFlags, PositionKind, Zodiac};
use gochara_time::CivilTime;
use gochara_vedic::{AyanamshaSystem, GeoLocation, NodeMode};
use serde::{Deserialize, Serialize};

/// Birth instant, place and the reckoning choices that go with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    /// Birth instant, UT Julian Day.
    pub birth_jd_ut: f64,
    pub location: GeoLocation,
    #[serde(default = "default_zodiac")]
    pub zodiac: Zodiac,
    #[serde(default)]
    pub position: PositionKind,
    #[serde(default)]
    pub nutation: bool,
    #[serde(default)]
    pub node_mode: NodeMode,
}

fn default_zodiac() -> Zodiac {
    Zodiac::Sidereal(AyanamshaSystem::Lahiri)
}

impl NatalChart {
    /// Lahiri sidereal, apparent positions, mean nodes, no nutation.
    pub fn new(birth_jd_ut: f64, location: GeoLocation) -> Self {
        Self {
            birth_jd_ut,
            location,
            zodiac: default_zodiac(),
            position: PositionKind::Apparent,
            nutation: false,
            node_mode: NodeMode::Mean,
        }
    }

    /// Chart for a UT civil timestamp.
    pub fn from_civil(birth: CivilTime, location: GeoLocation) -> Self {
        Self::new(birth.to_jd_ut(), location)
    }

    pub fn with_zodiac(self, zodiac: Zodiac) -> Self {
        Self { zodiac, ..self }
    }

    pub fn with_position(self, position: PositionKind) -> Self {
        Self { position, ..self }
    }

    pub fn with_nutation(self, nutation: bool) -> Self {
        Self { nutation, ..self }
    }

    pub fn with_node_mode(self, node_mode: NodeMode) -> Self {
        Self { node_mode, ..self }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.birth_jd_ut.is_finite() {
            return Err("birth instant must be finite");
        }
        self.location.validate()
    }

    /// Flags every query against this chart uses.
    pub fn flags(&self) -> PositionFlags {
        PositionFlags {
            zodiac: self.zodiac,
            position: self.position,
            nutation: self.nutation,
            speed: true,
        }
    }
}
