//! Flag set controlling how a position is reported.
//!
//! Both providers compute longitude referred to the mean equinox of date.
//! [`PositionFlags::frame_offset_deg`] is the shift from that frame to the
//! one the flags ask for, so both backends share exactly one definition.

use gochara_frames::nutation_longitude_deg;
use gochara_time::{jd_to_centuries, ut_to_tt};
use gochara_vedic::{AyanamshaSystem, ayanamsha_deg};
use serde::{Deserialize, Serialize};

/// Zodiac the longitude is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zodiac {
    #[default]
    Tropical,
    Sidereal(AyanamshaSystem),
}

/// Geometric position, or the light-time corrected position the observer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    True,
    #[default]
    Apparent,
}

/// Immutable per-request flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionFlags {
    pub zodiac: Zodiac,
    pub position: PositionKind,
    /// Add nutation in longitude (true equinox of date).
    pub nutation: bool,
    /// Report speed; when off, providers return 0.0 for it.
    pub speed: bool,
}

impl Default for PositionFlags {
    fn default() -> Self {
        Self {
            zodiac: Zodiac::Tropical,
            position: PositionKind::Apparent,
            nutation: true,
            speed: true,
        }
    }
}

impl PositionFlags {
    /// Sidereal, geometric, no nutation, with speed.
    pub fn sidereal_true(system: AyanamshaSystem) -> Self {
        Self {
            zodiac: Zodiac::Sidereal(system),
            position: PositionKind::True,
            nutation: false,
            speed: true,
        }
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

    pub fn with_speed(self, speed: bool) -> Self {
        Self { speed, ..self }
    }

    pub fn is_apparent(&self) -> bool {
        self.position == PositionKind::Apparent
    }

    /// Degrees to add to a mean-equinox-of-date longitude at `jd_ut`.
    pub fn frame_offset_deg(&self, jd_ut: f64) -> f64 {
        let t = jd_to_centuries(ut_to_tt(jd_ut));
        let mut offset = 0.0;
        if self.nutation {
            offset += nutation_longitude_deg(t);
        }
        if let Zodiac::Sidereal(system) = self.zodiac {
            offset -= ayanamsha_deg(system, t, self.nutation);
        }
        offset
    }

    /// Rate of [`PositionFlags::frame_offset_deg`], degrees/day.
    pub fn frame_offset_rate(&self, jd_ut: f64) -> f64 {
        const H: f64 = 0.5;
        (self.frame_offset_deg(jd_ut + H) - self.frame_offset_deg(jd_ut - H)) / (2.0 * H)
    }
}
