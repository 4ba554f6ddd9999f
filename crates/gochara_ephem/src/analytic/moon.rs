//! Geocentric Moon from the principal terms of the ELP-2000/82 lunar theory.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 47
//! (Tables 47.A and 47.B). Longitude is referred to the mean equinox of
//! date; accuracy is about 10″ in longitude and 4″ in latitude.

use gochara_frames::normalize_360;

/// Mean Earth-Moon distance of the series, km.
pub(crate) const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Geocentric Moon, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MoonPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub distance_km: f64,
}

/// Multiples of (D, M, M', F), then Σl (1e-6 deg) and Σr (1e-3 km).
#[rustfmt::skip]
const LON_DIST_TERMS: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
    (2, 1, 1, 0, -810.0, 2_616.0),
    (4, -1, -2, 0, 759.0, -1_897.0),
    (0, 2, -1, 0, -713.0, -2_117.0),
    (2, 2, -1, 0, -700.0, 2_354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1_423.0),
    (0, 0, 4, 0, 537.0, -1_117.0),
    (4, -1, 0, 0, 520.0, -1_571.0),
    (1, 0, -2, 0, -487.0, -1_739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4_421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1_165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8_752.0),
];

/// Multiples of (D, M, M', F), then Σb (1e-6 deg).
#[rustfmt::skip]
const LAT_TERMS: [(i8, i8, i8, i8, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

/// Moon at `t` Julian centuries (TT) since J2000.0.
pub(crate) fn moon_of_date(t: f64) -> MoonPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    // Decreasing eccentricity of the Earth's orbit scales the solar-anomaly terms.
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let (d, m, mp, f) = (
        d.to_radians(),
        m.to_radians(),
        mp.to_radians(),
        f.to_radians(),
    );
    let e_factor = |k: i8| match k.abs() {
        0 => 1.0,
        1 => ecc,
        _ => ecc * ecc,
    };
    let arg = |kd: i8, km: i8, kmp: i8, kf: i8| {
        kd as f64 * d + km as f64 * m + kmp as f64 * mp + kf as f64 * f
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(kd, km, kmp, kf, cl, cr) in &LON_DIST_TERMS {
        let x = arg(kd, km, kmp, kf);
        let ef = e_factor(km);
        sum_l += cl * ef * x.sin();
        sum_r += cr * ef * x.cos();
    }
    let mut sum_b = 0.0;
    for &(kd, km, kmp, kf, cb) in &LAT_TERMS {
        sum_b += cb * e_factor(km) * arg(kd, km, kmp, kf).sin();
    }

    let lp_r = lp.to_radians();
    sum_l += 3958.0 * a1.to_radians().sin()
        + 1962.0 * (lp_r - f).sin()
        + 318.0 * a2.to_radians().sin();
    sum_b += -2235.0 * lp_r.sin()
        + 382.0 * a3.to_radians().sin()
        + 175.0 * (a1.to_radians() - f).sin()
        + 175.0 * (a1.to_radians() + f).sin()
        + 127.0 * (lp_r - mp).sin()
        - 115.0 * (lp_r + mp).sin();

    MoonPosition {
        lon_deg: normalize_360(lp + sum_l / 1e6),
        lat_deg: sum_b / 1e6,
        distance_km: MEAN_DISTANCE_KM + sum_r / 1e3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_47a() {
        // 1992 April 12, 0h TD
        let p = moon_of_date(-0.077_221_081_451);
        assert!((p.lon_deg - 133.162_655).abs() < 0.003, "lon = {}", p.lon_deg);
        assert!((p.lat_deg + 3.229_126).abs() < 0.02, "lat = {}", p.lat_deg);
        assert!((p.distance_km - 368_409.7).abs() < 5.0, "dist = {}", p.distance_km);
    }

    #[test]
    fn distance_stays_in_orbit_band() {
        for i in 0..400 {
            let p = moon_of_date(-1.0 + i as f64 * 0.005);
            assert!(p.distance_km > 356_000.0 && p.distance_km < 407_000.0);
            assert!(p.lat_deg.abs() < 5.35);
        }
    }
}
