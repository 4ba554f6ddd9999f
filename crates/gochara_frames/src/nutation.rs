//! Fundamental lunar arguments and a short nutation series.
//!
//! The four-term nutation series is accurate to about 0.5″ in longitude,
//! two orders of magnitude below the transit solver's tolerance.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 22
//! (fundamental arguments, Eq. 22.1 family, and the low-accuracy Δψ/Δε).

/// The five Delaunay-style fundamental arguments, in degrees [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArgs {
    /// Mean elongation of the Moon from the Sun.
    pub d: f64,
    /// Mean anomaly of the Sun.
    pub m: f64,
    /// Mean anomaly of the Moon.
    pub m_moon: f64,
    /// Moon's argument of latitude.
    pub f: f64,
    /// Longitude of the Moon's mean ascending node.
    pub omega: f64,
}

/// Fundamental arguments at `t` Julian centuries (TT) since J2000.0.
pub fn fundamental_arguments(t: f64) -> FundamentalArgs {
    let t2 = t * t;
    let t3 = t2 * t;
    let wrap = crate::angle::normalize_360;
    FundamentalArgs {
        d: wrap(297.850_36 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0),
        m: wrap(357.527_72 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0),
        m_moon: wrap(134.962_98 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0),
        f: wrap(93.271_91 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0),
        omega: wrap(125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0),
    }
}

/// Mean longitudes of the Sun and Moon used by the short series, radians.
fn solar_lunar_mean_longitudes_rad(t: f64) -> (f64, f64) {
    let l_sun = (280.4665 + 36_000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();
    (l_sun, l_moon)
}

/// Nutation in longitude Δψ, in degrees.
pub fn nutation_longitude_deg(t: f64) -> f64 {
    let om = fundamental_arguments(t).omega.to_radians();
    let (l, lp) = solar_lunar_mean_longitudes_rad(t);
    let arcsec = -17.20 * om.sin() - 1.32 * (2.0 * l).sin() - 0.23 * (2.0 * lp).sin()
        + 0.21 * (2.0 * om).sin();
    arcsec / 3600.0
}

/// Nutation in obliquity Δε, in degrees.
pub fn nutation_obliquity_deg(t: f64) -> f64 {
    let om = fundamental_arguments(t).omega.to_radians();
    let (l, lp) = solar_lunar_mean_longitudes_rad(t);
    let arcsec = 9.20 * om.cos() + 0.57 * (2.0 * l).cos() + 0.10 * (2.0 * lp).cos()
        - 0.09 * (2.0 * om).cos();
    arcsec / 3600.0
}

/// True obliquity of date (mean obliquity + Δε), in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    crate::obliquity::mean_obliquity_deg(t) + nutation_obliquity_deg(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Meeus Example 22.a: 1987 April 10, 0h TD, T = -0.127296372348.
    const T_22A: f64 = -0.127_296_372_348;

    #[test]
    fn example_22a_arguments() {
        let a = fundamental_arguments(T_22A);
        assert!((a.d - 136.9623).abs() < 1e-3, "D = {}", a.d);
        assert!((a.m - 94.9792).abs() < 1e-3, "M = {}", a.m);
        assert!((a.m_moon - 229.2784).abs() < 1e-3, "M' = {}", a.m_moon);
        assert!((a.f - 143.4079).abs() < 1e-3, "F = {}", a.f);
        assert!((a.omega - 11.2531).abs() < 1e-3, "Omega = {}", a.omega);
    }

    #[test]
    fn example_22a_nutation() {
        // Full series gives Δψ = -3.788″, Δε = +9.443″; short series within 0.5″.
        let dpsi = nutation_longitude_deg(T_22A) * 3600.0;
        let deps = nutation_obliquity_deg(T_22A) * 3600.0;
        assert!((dpsi + 3.788).abs() < 0.5, "dpsi = {dpsi}");
        assert!((deps - 9.443).abs() < 0.5, "deps = {deps}");
    }

    #[test]
    fn nutation_amplitude_bounded() {
        for i in 0..200 {
            let t = -1.0 + i as f64 * 0.01;
            assert!(nutation_longitude_deg(t).abs() * 3600.0 < 19.0);
        }
    }

    #[test]
    fn true_obliquity_near_mean() {
        let diff = (true_obliquity_deg(0.24) - crate::obliquity::mean_obliquity_deg(0.24)).abs();
        assert!(diff * 3600.0 < 10.0);
    }
}
