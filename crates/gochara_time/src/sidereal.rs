//! Greenwich and local mean sidereal time.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Eq. 12.4. The UT
//! Julian Day is used directly as UT1; the sub-second UT1−UTC offset is
//! far below what ascendant-based reference points need.

use std::f64::consts::TAU;

use crate::julian::J2000_JD;

/// Greenwich Mean Sidereal Time at a UT Julian Day, in radians [0, 2π).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / 36_525.0;
    let deg = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    deg.to_radians().rem_euclid(TAU)
}

/// Local sidereal time from GMST and east-positive geographic longitude.
///
/// Returns radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst_rad: f64, longitude_east_rad: f64) -> f64 {
    (gmst_rad + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s = 197.693195 deg
        let gmst = gmst_rad(2_446_895.5).to_degrees();
        assert!((gmst - 197.693_195).abs() < 1e-4, "gmst = {gmst}");
    }

    #[test]
    fn meeus_example_12b() {
        // 1987 April 10, 19h21m00s UT: GMST = 128.737873 deg
        let jd = 2_446_895.5 + (19.0 + 21.0 / 60.0) / 24.0;
        let gmst = gmst_rad(jd).to_degrees();
        assert!((gmst - 128.737_873).abs() < 1e-4, "gmst = {gmst}");
    }

    #[test]
    fn lst_wraps() {
        let lst = local_sidereal_time_rad(6.0, 1.0);
        assert!(lst >= 0.0 && lst < TAU);
        assert!((lst - (7.0 - TAU)).abs() < 1e-12);
    }
}
