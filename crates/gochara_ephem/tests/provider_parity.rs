//! Differential tests: the tabulated backend must reproduce the analytic
//! backend within 0.001° of longitude for every body and flag combination.
//!
//! A 120-day table is fitted once per test binary, written to a temporary
//! file and reopened through an `Ephemeris` session so the file path is
//! exercised end to end.

use std::sync::OnceLock;

use gochara_ephem::{
    ALL_BODIES, AnalyticProvider, Body, EphemError, Ephemeris, EphemerisConfig, PositionFlags,
    PositionKind, PositionProvider, TableBuilder, Zodiac,
};
use gochara_frames::circular_distance;
use gochara_vedic::AyanamshaSystem;
use rstest::rstest;
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// Tolerances
// ---------------------------------------------------------------------------

/// Longitude agreement between backends, degrees.
const PARITY_TOL_DEG: f64 = 1.0e-3;
/// Speed agreement, degrees/day.
const SPEED_TOL_DEG_DAY: f64 = 1.0e-3;
/// Latitude agreement, degrees (tables store geometric latitude).
const LAT_TOL_DEG: f64 = 1.0e-2;

/// 2024-01-01 0h UT.
const TABLE_START: f64 = 2_460_310.5;
const TABLE_DAYS: f64 = 120.0;

// ---------------------------------------------------------------------------
// Shared fixture
// ---------------------------------------------------------------------------

struct Fixture {
    _file: NamedTempFile,
    session: Ephemeris,
}

fn tabulated() -> &'static Ephemeris {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    &FIXTURE
        .get_or_init(|| {
            let table = TableBuilder::new(TABLE_START, TABLE_START + TABLE_DAYS)
                .build(&AnalyticProvider)
                .expect("table should build");
            let file = NamedTempFile::new().expect("temp file");
            table.save(file.path()).expect("table should save");
            let session = Ephemeris::open(EphemerisConfig::tabulated(file.path()))
                .expect("table should load");
            Fixture {
                _file: file,
                session,
            }
        })
        .session
}

fn sample_instants() -> impl Iterator<Item = f64> {
    // Irregular offsets so samples do not sit on segment boundaries.
    (0..47).map(|i| TABLE_START + 0.113 + i as f64 * 2.531)
}

// ---------------------------------------------------------------------------
// Parity
// ---------------------------------------------------------------------------

#[rstest]
fn longitude_parity(
    #[values(
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::MeanNode,
        Body::TrueNode
    )]
    body: Body,
    #[values(
        Zodiac::Tropical,
        Zodiac::Sidereal(AyanamshaSystem::Lahiri),
        Zodiac::Sidereal(AyanamshaSystem::TrueLahiri)
    )]
    zodiac: Zodiac,
    #[values(PositionKind::True, PositionKind::Apparent)] position: PositionKind,
    #[values(false, true)] nutation: bool,
) {
    let flags = PositionFlags {
        zodiac,
        position,
        nutation,
        speed: true,
    };
    let tab = tabulated();
    for jd in sample_instants() {
        let a = AnalyticProvider.position(body, jd, flags).unwrap();
        let t = tab.position(body, jd, flags).unwrap();
        let dlon = circular_distance(a.lon_deg, t.lon_deg);
        assert!(
            dlon.abs() < PARITY_TOL_DEG,
            "{body} {flags:?} jd={jd}: analytic {} vs tabulated {}",
            a.lon_deg,
            t.lon_deg
        );
        assert!(
            (a.speed_deg_per_day - t.speed_deg_per_day).abs() < SPEED_TOL_DEG_DAY,
            "{body} jd={jd}: speed {} vs {}",
            a.speed_deg_per_day,
            t.speed_deg_per_day
        );
        assert!((a.lat_deg - t.lat_deg).abs() < LAT_TOL_DEG, "{body} jd={jd}: latitude");
    }
}

#[test]
fn every_body_present_in_table() {
    let tab = tabulated();
    for body in ALL_BODIES {
        assert!(
            tab.position(body, TABLE_START + 1.0, PositionFlags::default()).is_ok(),
            "{body}"
        );
    }
}

#[rstest]
#[case(TABLE_START - 0.5)]
#[case(TABLE_START + TABLE_DAYS + 0.5)]
fn tabulated_out_of_range(#[case] jd: f64) {
    let err = tabulated()
        .longitude(Body::Sun, jd, PositionFlags::default())
        .unwrap_err();
    assert_eq!(err, EphemError::OutOfRange { jd_ut: jd });
}

#[test]
fn speed_off_is_zero_in_both_backends() {
    let flags = PositionFlags::default().with_speed(false);
    let jd = TABLE_START + 10.0;
    assert_eq!(AnalyticProvider.longitude(Body::Moon, jd, flags).unwrap().1, 0.0);
    assert_eq!(tabulated().longitude(Body::Moon, jd, flags).unwrap().1, 0.0);
}

#[test]
fn garbled_file_is_invalid_data() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"GCHT\x07\x00garbage").unwrap();
    let err = Ephemeris::open(EphemerisConfig::tabulated(file.path())).unwrap_err();
    assert!(matches!(err, EphemError::InvalidData(_)), "{err}");
}
