//! Circular angle arithmetic in degrees.
//!
//! Longitudes live on a circle: 360° ≡ 0°. Every difference between two
//! longitudes goes through [`circular_distance`] so that the 0°/360° seam
//! never looks like a 360° jump.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed circular distance `a − b`, in (−180, 180] degrees.
///
/// Antisymmetric (`circular_distance(a, b) == -circular_distance(b, a)`)
/// whenever the points are not exactly opposite.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let mut d = (a - b) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Whether a sign change between two circular distances is a real zero
/// crossing rather than the ±180° wrap on the opposite side of the circle.
///
/// A genuine crossing has both values relatively small in magnitude.
pub fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Return `deg + k·360` closest to `reference`.
///
/// Used to build continuous (unwrapped) longitude series.
pub fn unwrap_near(deg: f64, reference: f64) -> f64 {
    reference + circular_distance(deg, reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_basic() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_domain() {
        let r = normalize_360(-1e-20);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn circular_distance_across_seam() {
        assert!((circular_distance(1.0, 359.0) - 2.0).abs() < 1e-12);
        assert!((circular_distance(359.0, 1.0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn circular_distance_opposite_is_plus_180() {
        assert_eq!(circular_distance(180.0, 0.0), 180.0);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
    }

    #[test]
    fn circular_distance_large_inputs() {
        assert!((circular_distance(725.0, -5.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn genuine_crossing_positive() {
        assert!(is_genuine_crossing(5.0, -3.0));
        assert!(is_genuine_crossing(-10.0, 10.0));
    }

    #[test]
    fn wraparound_rejected() {
        assert!(!is_genuine_crossing(170.0, -170.0));
        assert!(!is_genuine_crossing(-170.0, 170.0));
    }

    #[test]
    fn same_sign_is_not_crossing() {
        assert!(!is_genuine_crossing(1.0, 2.0));
        assert!(!is_genuine_crossing(0.0, 2.0));
    }

    #[test]
    fn unwrap_follows_reference() {
        assert!((unwrap_near(2.0, 358.0) - 362.0).abs() < 1e-12);
        assert!((unwrap_near(358.0, 722.0) - 718.0).abs() < 1e-12);
        assert!((unwrap_near(10.0, 0.0) - 10.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn circular_distance_is_bounded(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = circular_distance(a, b);
            prop_assert!(d > -180.0 && d <= 180.0, "d = {}", d);
        }

        #[test]
        fn circular_distance_is_antisymmetric(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let ab = circular_distance(a, b);
            let ba = circular_distance(b, a);
            if ab.abs() < 180.0 {
                prop_assert_eq!(ab, -ba);
            } else {
                prop_assert_eq!(ab, ba);
            }
        }

        #[test]
        fn normalize_lands_in_domain(x in -1.0e6f64..1.0e6) {
            let n = normalize_360(x);
            prop_assert!((0.0..360.0).contains(&n));
            prop_assert!(circular_distance(n, x).abs() < 1e-6);
        }
    }
}
