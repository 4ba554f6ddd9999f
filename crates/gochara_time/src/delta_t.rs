//! ΔT = TT − UT.
//!
//! Piecewise polynomials from Espenak & Meeus, "Five Millennium Canon of
//! Solar Eclipses" (NASA/TP-2006-214141), covering 1800–2150 explicitly and
//! falling back to the long-term parabola outside that span.

use crate::julian::decimal_year;

/// Seconds per day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// ΔT in seconds at a UT Julian Day.
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    let y = decimal_year(jd_ut);

    if y < 1800.0 || y >= 2150.0 {
        let u = (y - 1820.0) / 100.0;
        return -20.0 + 32.0 * u * u;
    }
    if y < 1860.0 {
        let t = y - 1800.0;
        return 13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7);
    }
    if y < 1900.0 {
        let t = y - 1860.0;
        return 7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0;
    }
    if y < 1920.0 {
        let t = y - 1900.0;
        return -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4);
    }
    if y < 1941.0 {
        let t = y - 1920.0;
        return 21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3);
    }
    if y < 1961.0 {
        let t = y - 1950.0;
        return 29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0;
    }
    if y < 1986.0 {
        let t = y - 1975.0;
        return 45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0;
    }
    if y < 2005.0 {
        let t = y - 2000.0;
        return 63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5);
    }
    if y < 2050.0 {
        let t = y - 2000.0;
        return 62.92 + 0.32217 * t + 0.005589 * t.powi(2);
    }
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
}

/// Convert a UT Julian Day to a TT Julian Day.
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(jd_ut) / SECONDS_PER_DAY
}

/// Convert a TT Julian Day back to UT.
///
/// ΔT changes by well under a second per day, so two fixed-point passes
/// are exact to double precision.
pub fn tt_to_ut(jd_tt: f64) -> f64 {
    let mut jd_ut = jd_tt - delta_t_seconds(jd_tt) / SECONDS_PER_DAY;
    jd_ut = jd_tt - delta_t_seconds(jd_ut) / SECONDS_PER_DAY;
    jd_ut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::calendar_to_jd;

    #[test]
    fn delta_t_2000() {
        let dt = delta_t_seconds(calendar_to_jd(2000, 1, 1.5));
        assert!((dt - 63.86).abs() < 0.1, "dt = {dt}");
    }

    #[test]
    fn delta_t_1900_near_zero() {
        let dt = delta_t_seconds(calendar_to_jd(1900, 1, 1.0));
        assert!(dt.abs() < 3.0, "dt = {dt}");
    }

    #[test]
    fn delta_t_2024_around_69s() {
        let dt = delta_t_seconds(calendar_to_jd(2024, 1, 1.0));
        assert!(dt > 65.0 && dt < 75.0, "dt = {dt}");
    }

    #[test]
    fn delta_t_continuous_at_2005() {
        let before = delta_t_seconds(calendar_to_jd(2004, 12, 31.9));
        let after = delta_t_seconds(calendar_to_jd(2005, 1, 1.1));
        assert!((before - after).abs() < 0.5, "{before} vs {after}");
    }

    #[test]
    fn tt_ut_roundtrip() {
        let jd_ut = 2_460_000.25;
        let back = tt_to_ut(ut_to_tt(jd_ut));
        assert!((back - jd_ut).abs() < 1e-10);
    }
}
