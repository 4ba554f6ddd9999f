//! IAU 2006 general precession in ecliptic longitude.
//!
//! The general precession p_A measures the accumulated westward motion of
//! the vernal equinox along the ecliptic since J2000.0. Tropical longitudes
//! referred to the J2000 equinox become longitudes of date by adding p_A,
//! and every ayanamsha grows by the same amount.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567-586.

/// General precession in ecliptic longitude, in arcseconds.
///
/// `t` = Julian centuries (TT) since J2000.0. Dominant rate ≈ 5028.8″/century.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession in ecliptic longitude, in degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}
