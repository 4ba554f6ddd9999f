//! Heliocentric planet positions from Keplerian mean elements.
//!
//! Elements and rates: Standish, "Keplerian Elements for Approximate
//! Positions of the Major Planets" (JPL), Table 1, valid 1800-2050 AD.
//! Output is heliocentric ecliptic J2000 Cartesian, in AU.

use std::f64::consts::TAU;

/// Bodies with an element set. `EarthMoon` is the Earth-Moon barycentre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orbit {
    Mercury,
    Venus,
    EarthMoon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// `[value at J2000, rate per century]` for each element.
struct Elements {
    a: [f64; 2],
    e: [f64; 2],
    incl: [f64; 2],
    mean_lon: [f64; 2],
    long_peri: [f64; 2],
    long_node: [f64; 2],
}

#[rustfmt::skip]
const MERCURY: Elements = Elements {
    a: [0.387_099_27, 0.000_000_37], e: [0.205_635_93, 0.000_019_06],
    incl: [7.004_979_02, -0.005_947_49], mean_lon: [252.250_323_50, 149_472.674_111_75],
    long_peri: [77.457_796_28, 0.160_476_89], long_node: [48.330_765_93, -0.125_340_81],
};
#[rustfmt::skip]
const VENUS: Elements = Elements {
    a: [0.723_335_66, 0.000_003_90], e: [0.006_776_72, -0.000_041_07],
    incl: [3.394_676_05, -0.000_788_90], mean_lon: [181.979_099_50, 58_517.815_387_29],
    long_peri: [131.602_467_18, 0.002_683_29], long_node: [76.679_842_55, -0.277_694_18],
};
#[rustfmt::skip]
const EARTH_MOON: Elements = Elements {
    a: [1.000_002_61, 0.000_005_62], e: [0.016_711_23, -0.000_043_92],
    incl: [-0.000_015_31, -0.012_946_68], mean_lon: [100.464_571_66, 35_999.372_449_81],
    long_peri: [102.937_681_93, 0.323_273_64], long_node: [0.0, 0.0],
};
#[rustfmt::skip]
const MARS: Elements = Elements {
    a: [1.523_710_34, 0.000_018_47], e: [0.093_394_10, 0.000_078_82],
    incl: [1.849_691_42, -0.008_131_31], mean_lon: [-4.553_432_05, 19_140.302_684_99],
    long_peri: [-23.943_629_59, 0.444_410_88], long_node: [49.559_538_91, -0.292_573_43],
};
#[rustfmt::skip]
const JUPITER: Elements = Elements {
    a: [5.202_887_00, -0.000_116_07], e: [0.048_386_24, -0.000_132_53],
    incl: [1.304_396_95, -0.001_837_14], mean_lon: [34.396_440_51, 3_034.746_127_75],
    long_peri: [14.728_479_83, 0.212_526_68], long_node: [100.473_909_09, 0.204_691_06],
};
#[rustfmt::skip]
const SATURN: Elements = Elements {
    a: [9.536_675_94, -0.001_250_60], e: [0.053_861_79, -0.000_509_91],
    incl: [2.485_991_87, 0.001_936_09], mean_lon: [49.954_244_23, 1_222.493_622_01],
    long_peri: [92.598_878_31, -0.418_972_16], long_node: [113.662_424_48, -0.288_677_94],
};
#[rustfmt::skip]
const URANUS: Elements = Elements {
    a: [19.189_164_64, -0.001_961_76], e: [0.047_257_44, -0.000_043_97],
    incl: [0.772_637_83, -0.002_429_39], mean_lon: [313.238_104_51, 428.482_027_85],
    long_peri: [170.954_276_30, 0.408_052_81], long_node: [74.016_925_03, 0.042_405_89],
};
#[rustfmt::skip]
const NEPTUNE: Elements = Elements {
    a: [30.069_922_76, 0.000_262_91], e: [0.008_590_48, 0.000_051_05],
    incl: [1.770_043_47, 0.000_353_72], mean_lon: [-55.120_029_69, 218.459_453_25],
    long_peri: [44.964_762_27, -0.322_414_64], long_node: [131.784_225_74, -0.005_086_64],
};
#[rustfmt::skip]
const PLUTO: Elements = Elements {
    a: [39.482_116_75, -0.000_315_96], e: [0.248_827_30, 0.000_051_70],
    incl: [17.140_012_06, 0.000_048_18], mean_lon: [238.929_038_33, 145.207_805_15],
    long_peri: [224.068_916_29, -0.040_629_42], long_node: [110.303_936_84, -0.011_834_82],
};

impl Orbit {
    fn elements(self) -> &'static Elements {
        match self {
            Self::Mercury => &MERCURY,
            Self::Venus => &VENUS,
            Self::EarthMoon => &EARTH_MOON,
            Self::Mars => &MARS,
            Self::Jupiter => &JUPITER,
            Self::Saturn => &SATURN,
            Self::Uranus => &URANUS,
            Self::Neptune => &NEPTUNE,
            Self::Pluto => &PLUTO,
        }
    }
}

/// Solve Kepler's equation `E - e sin E = M` (radians) by Newton iteration.
pub(crate) fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let m = (mean_anomaly + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    let mut ecc = if e < 0.8 { m } else { std::f64::consts::PI.copysign(m) };
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-14 {
            break;
        }
    }
    ecc
}

/// Heliocentric ecliptic J2000 position in AU, `t` in Julian centuries (TT).
pub(crate) fn heliocentric_j2000(orbit: Orbit, t: f64) -> [f64; 3] {
    let el = orbit.elements();
    let at = |p: [f64; 2]| p[0] + p[1] * t;

    let a = at(el.a);
    let e = at(el.e);
    let incl = at(el.incl).to_radians();
    let node = at(el.long_node).to_radians();
    let peri = at(el.long_peri).to_radians();
    let arg_peri = peri - node;
    let mean_anom = at(el.mean_lon).to_radians() - peri;

    let ecc = eccentric_anomaly(mean_anom, e);
    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.sin_cos();
    let (si, ci) = incl.sin_cos();
    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}
