//! Lagna (ascendant): the ecliptic point rising on the eastern horizon.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 13, with the
//! quadrant chosen so the result is the eastern (rising) intersection.

use gochara_frames::{normalize_360, true_obliquity_deg};
use gochara_time::{gmst_rad, jd_to_centuries, local_sidereal_time_rad, ut_to_tt};

use crate::location::GeoLocation;

/// Tropical ecliptic longitude of the ascendant from local sidereal time.
///
/// `lst_rad` and `lat_rad` in radians, `obliquity_deg` in degrees.
/// Returns degrees in [0, 360).
pub fn ascendant_from_lst_deg(lst_rad: f64, lat_rad: f64, obliquity_deg: f64) -> f64 {
    let eps = obliquity_deg.to_radians();
    let y = lst_rad.cos();
    let x = -(lst_rad.sin() * eps.cos() + lat_rad.tan() * eps.sin());
    normalize_360(y.atan2(x).to_degrees())
}

/// Tropical ascendant longitude (degrees) at a UT Julian Day and location.
///
/// Uses the true obliquity of date.
pub fn ascendant_deg(jd_ut: f64, location: &GeoLocation) -> f64 {
    let t = jd_to_centuries(ut_to_tt(jd_ut));
    let lst = local_sidereal_time_rad(gmst_rad(jd_ut), location.longitude_rad());
    ascendant_from_lst_deg(lst, location.latitude_rad(), true_obliquity_deg(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_frames::circular_distance;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 23.4392911;

    #[test]
    fn equator_lst_zero_rises_cancer() {
        // Aries culminates, so 90° (Cancer) rises.
        let asc = ascendant_from_lst_deg(0.0, 0.0, EPS);
        assert!((asc - 90.0).abs() < 1e-9, "asc = {asc}");
    }

    #[test]
    fn equator_lst_six_hours_rises_libra() {
        let asc = ascendant_from_lst_deg(FRAC_PI_2, 0.0, EPS);
        assert!((asc - 180.0).abs() < 1e-9, "asc = {asc}");
    }

    #[test]
    fn equator_lst_eighteen_hours_rises_aries() {
        let asc = ascendant_from_lst_deg(3.0 * FRAC_PI_2, 0.0, EPS);
        assert!(circular_distance(asc, 0.0).abs() < 1e-9, "asc = {asc}");
    }

    #[test]
    fn ascendant_runs_ahead_of_mc() {
        // The ascendant is always 0..180° east of the midheaven.
        for i in 0..48 {
            let lst = i as f64 * PI / 24.0;
            let mc = normalize_360(lst.sin().atan2(lst.cos() * EPS.to_radians().cos()).to_degrees());
            for lat in [-50.0_f64, 0.0, 13.08, 50.45] {
                let asc = ascendant_from_lst_deg(lst, lat.to_radians(), EPS);
                let lead = normalize_360(asc - mc);
                assert!(lead > 0.0 && lead < 180.0, "lst={lst} lat={lat} lead={lead}");
            }
        }
    }

    #[test]
    fn full_sidereal_day_sweeps_every_sign() {
        let loc = GeoLocation::new(13.0827, 80.2707, 0.0);
        let mut seen = [false; 12];
        for i in 0..288 {
            let asc = ascendant_deg(2_459_580.5 + i as f64 / 288.0, &loc);
            seen[(asc / 30.0) as usize % 12] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
