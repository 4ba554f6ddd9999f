//! Bodies whose geocentric longitude the providers can compute.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sun, Moon, the planets through Pluto, and the two lunar node models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
}

pub const ALL_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::MeanNode,
    Body::TrueNode,
];

impl Body {
    /// Compact numeric code (0 = Sun .. 11 = true node), used in table files.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        ALL_BODIES.get(code as usize).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
            Self::MeanNode => "mean_node",
            Self::TrueNode => "true_node",
        }
    }

    /// Long-run magnitude of geocentric longitude motion, degrees/day.
    ///
    /// Mercury and Venus are tied to the Sun on average but move faster
    /// around inferior conjunction; their figures reflect that.
    pub const fn mean_motion_deg_per_day(self) -> f64 {
        match self {
            Self::Sun => 0.985_647,
            Self::Moon => 13.176_358,
            Self::Mercury => 1.383,
            Self::Venus => 1.2,
            Self::Mars => 0.524,
            Self::Jupiter => 0.083_1,
            Self::Saturn => 0.033_5,
            Self::Uranus => 0.011_7,
            Self::Neptune => 0.006,
            Self::Pluto => 0.004,
            Self::MeanNode | Self::TrueNode => 0.052_95,
        }
    }

    /// Whether the body's longitude normally decreases.
    pub const fn is_retrograde_by_default(self) -> bool {
        matches!(self, Self::MeanNode | Self::TrueNode)
    }

    /// Whether the body can turn stationary and reverse direction.
    pub const fn has_stations(self) -> bool {
        !matches!(self, Self::Sun | Self::Moon | Self::MeanNode)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        let alias = match wanted.as_str() {
            "rahu" | "node" => "mean_node",
            "true_rahu" => "true_node",
            other => other,
        };
        ALL_BODIES
            .iter()
            .copied()
            .find(|b| b.name() == alias)
            .ok_or_else(|| format!("unknown body: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dense() {
        for (i, b) in ALL_BODIES.iter().enumerate() {
            assert_eq!(b.code() as usize, i);
            assert_eq!(Body::from_code(i as u8), Some(*b));
        }
        assert_eq!(Body::from_code(12), None);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("Moon".parse(), Ok(Body::Moon));
        assert_eq!("rahu".parse(), Ok(Body::MeanNode));
        assert_eq!("true-node".parse(), Ok(Body::TrueNode));
        assert!("vulcan".parse::<Body>().is_err());
    }

    #[test]
    fn motions_positive() {
        for b in ALL_BODIES {
            assert!(b.mean_motion_deg_per_day() > 0.0, "{b}");
        }
    }
}
