//! Rashi (30° sign) lookup and degree-minute-second formatting.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gochara_frames::normalize_360;
use serde::{Deserialize, Serialize};

/// Width of one sign in degrees.
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// The twelve signs, Mesha (Aries) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index, Mesha = 0.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sign at `index mod 12`.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Start of the sign in degrees, relative to whatever origin the
    /// caller measures from.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * RASHI_SPAN_DEG
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rashi {
    type Err = String;

    /// Accepts Sanskrit or western names, case-insensitive, or an index 0..=11.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(idx) = s.parse::<u8>() {
            return if idx < 12 {
                Ok(Self::from_index(idx))
            } else {
                Err(format!("rashi index out of range: {idx}"))
            };
        }
        ALL_RASHIS
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(s) || r.western_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rashi: {s}"))
    }
}

/// Degrees, arc-minutes and arc-seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:05.2}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Split a non-negative angle into DMS. Negative input uses its magnitude.
pub fn deg_to_dms(deg: f64) -> Dms {
    let total_arcsec = deg.abs() * 3600.0;
    let degrees = (total_arcsec / 3600.0).floor();
    let rem = total_arcsec - degrees * 3600.0;
    let minutes = (rem / 60.0).floor().min(59.0);
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds: (rem - minutes * 60.0).max(0.0),
    }
}

/// Where a longitude falls in the zodiac.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// Offset into the sign, [0, 30).
    pub degrees_in_rashi: f64,
    pub dms: Dms,
}

/// Sign and in-sign position of a longitude (any origin, any range).
pub fn rashi_from_longitude(lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(lon_deg);
    let idx = ((lon / RASHI_SPAN_DEG).floor() as u8).min(11);
    let degrees_in_rashi = lon - idx as f64 * RASHI_SPAN_DEG;
    RashiInfo {
        rashi: Rashi::from_index(idx),
        degrees_in_rashi,
        dms: deg_to_dms(degrees_in_rashi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_order() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), *r);
        }
        assert_eq!(Rashi::from_index(13), Rashi::Vrishabha);
    }

    #[test]
    fn lookup_boundaries() {
        assert_eq!(rashi_from_longitude(0.0).rashi, Rashi::Mesha);
        assert_eq!(rashi_from_longitude(29.999).rashi, Rashi::Mesha);
        assert_eq!(rashi_from_longitude(30.0).rashi, Rashi::Vrishabha);
        assert_eq!(rashi_from_longitude(359.99).rashi, Rashi::Meena);
        assert_eq!(rashi_from_longitude(-1.0).rashi, Rashi::Meena);
        assert_eq!(rashi_from_longitude(725.0).rashi, Rashi::Mesha);
    }

    #[test]
    fn degrees_in_sign() {
        let info = rashi_from_longitude(95.5);
        assert_eq!(info.rashi, Rashi::Karka);
        assert!((info.degrees_in_rashi - 5.5).abs() < 1e-12);
        assert_eq!((info.dms.degrees, info.dms.minutes), (5, 30));
    }

    #[test]
    fn dms_lahiri_j2000() {
        let d = deg_to_dms(23.853);
        assert_eq!((d.degrees, d.minutes), (23, 51));
        assert!((d.seconds - 10.8).abs() < 0.01);
    }

    #[test]
    fn parse_names_and_indices() {
        assert_eq!("tula".parse(), Ok(Rashi::Tula));
        assert_eq!("Libra".parse(), Ok(Rashi::Tula));
        assert_eq!("11".parse(), Ok(Rashi::Meena));
        assert!("12".parse::<Rashi>().is_err());
        assert!("ophiuchus".parse::<Rashi>().is_err());
    }

    #[test]
    fn dms_display() {
        assert_eq!(deg_to_dms(10.5).to_string(), "10°30'00.00\"");
    }
}
