//! Mean obliquity of the ecliptic.
//!
//! Source: IAU 2006 (Hilton et al. 2006), as tabulated in IERS
//! Conventions 2010, Eq. 5.40. Public domain (IAU standard).

/// Mean obliquity at J2000.0 in degrees (84381.406″).
pub const OBLIQUITY_J2000_DEG: f64 = 84_381.406 / 3600.0;

/// Mean obliquity of the ecliptic of date, in degrees.
///
/// `t` = Julian centuries (TT) since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 84_381.406 - 46.836_769 * t - 0.000_183_1 * t * t + 0.002_003_40 * t.powi(3)
        - 0.000_000_576 * t.powi(4)
        - 0.000_000_043_4 * t.powi(5);
    arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_value() {
        assert!((mean_obliquity_deg(0.0) - OBLIQUITY_J2000_DEG).abs() < 1e-15);
        assert!((OBLIQUITY_J2000_DEG - 23.439_279).abs() < 1e-6);
    }

    #[test]
    fn decreases_over_time() {
        assert!(mean_obliquity_deg(1.0) < mean_obliquity_deg(0.0));
        // ~47″ per century
        let delta = (mean_obliquity_deg(0.0) - mean_obliquity_deg(1.0)) * 3600.0;
        assert!((delta - 46.8).abs() < 0.1, "delta = {delta}");
    }
}
