//! Reference resolver: turns a natal reference point into a longitude.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gochara_ephem::{Body, PositionProvider};
use gochara_frames::{normalize_360, nutation_longitude_deg};
use gochara_time::{jd_to_centuries, ut_to_tt};
use gochara_vedic::{NodeMode, ascendant_deg};

use crate::chart::NatalChart;
use crate::error::TransitError;

/// Natal point sign boundaries are counted from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferencePoint {
    /// Lagna at birth.
    Ascendant,
    Moon,
    Rahu,
    /// Rahu + 180°.
    Ketu,
    /// Any body's natal longitude.
    Body(Body),
    /// An explicit longitude in the chart's zodiac.
    Fixed(f64),
}

impl Display for ReferencePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascendant => f.write_str("lagna"),
            Self::Moon => f.write_str("moon"),
            Self::Rahu => f.write_str("rahu"),
            Self::Ketu => f.write_str("ketu"),
            Self::Body(b) => write!(f, "{b}"),
            Self::Fixed(lon) => write!(f, "{lon}"),
        }
    }
}

impl FromStr for ReferencePoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "lagna" | "ascendant" | "asc" => return Ok(Self::Ascendant),
            "moon" | "chandra" => return Ok(Self::Moon),
            "rahu" => return Ok(Self::Rahu),
            "ketu" => return Ok(Self::Ketu),
            _ => {}
        }
        if let Ok(lon) = key.parse::<f64>() {
            return Ok(Self::Fixed(lon));
        }
        key.parse::<Body>()
            .map(Self::Body)
            .map_err(|_| format!("unknown reference point: {s}"))
    }
}

/// Natal longitude of `point` in the chart's zodiac, degrees [0, 360).
pub fn resolve_reference(
    provider: &dyn PositionProvider,
    chart: &NatalChart,
    point: ReferencePoint,
) -> Result<f64, TransitError> {
    chart.validate().map_err(TransitError::InvalidConfig)?;
    let flags = chart.flags().with_speed(false);
    let jd = chart.birth_jd_ut;

    let lon = match point {
        ReferencePoint::Ascendant => {
            // Lagna comes out on the true equinox; take it to the mean
            // equinox before applying the chart's frame.
            let t = jd_to_centuries(ut_to_tt(jd));
            let mean = ascendant_deg(jd, &chart.location) - nutation_longitude_deg(t);
            mean + flags.frame_offset_deg(jd)
        }
        ReferencePoint::Moon => provider.position(Body::Moon, jd, flags)?.lon_deg,
        ReferencePoint::Rahu => provider.position(node_body(chart.node_mode), jd, flags)?.lon_deg,
        ReferencePoint::Ketu => {
            provider.position(node_body(chart.node_mode), jd, flags)?.lon_deg + 180.0
        }
        ReferencePoint::Body(body) => provider.position(body, jd, flags)?.lon_deg,
        ReferencePoint::Fixed(lon) if lon.is_finite() => lon,
        ReferencePoint::Fixed(_) => {
            return Err(TransitError::InvalidConfig("fixed reference must be finite"));
        }
    };
    Ok(normalize_360(lon))
}

fn node_body(mode: NodeMode) -> Body {
    match mode {
        NodeMode::Mean => Body::MeanNode,
        NodeMode::True => Body::TrueNode,
    }
}
