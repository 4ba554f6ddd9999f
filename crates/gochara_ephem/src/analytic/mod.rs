//! Analytic provider: positions evaluated directly from series models.
//!
//! - Planets: Keplerian mean elements, light-time corrected for apparent
//!   positions ([`kepler`]).
//! - Sun: the reflected heliocentric Earth, itself the Earth-Moon
//!   barycentre minus the Moon's share. Its apparent position carries the
//!   constant of annual aberration instead of light time.
//! - Moon: principal lunar-theory terms ([`moon`]).
//! - Nodes: mean Ω or the perturbed true node from `gochara_vedic`.
//!
//! Coverage matches the element set: 1800-01-01 to 2050-12-31.

mod kepler;
mod moon;

use gochara_frames::{
    SphericalCoords, cartesian_to_spherical, circular_distance, general_precession_longitude_deg,
    normalize_360,
};
use gochara_time::{jd_to_centuries, ut_to_tt};
use gochara_vedic::{mean_rahu_deg, true_rahu_deg};

use crate::body::Body;
use crate::error::EphemError;
use crate::flags::PositionFlags;
use crate::provider::{Coverage, EclipticPosition, PositionProvider};
use kepler::{Orbit, heliocentric_j2000};
use moon::{MEAN_DISTANCE_KM, moon_of_date};

/// First covered instant, 1800-01-01 0h UT.
pub const ANALYTIC_START_JD: f64 = 2_378_496.5;
/// Last covered instant, 2050-12-31 0h UT.
pub const ANALYTIC_END_JD: f64 = 2_469_807.5;

pub(crate) const AU_KM: f64 = 149_597_870.7;
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;
const EARTH_MOON_MASS_RATIO: f64 = 81.300_56;
/// Annual aberration constant κ, degrees at 1 AU.
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;
/// Half-width of the central difference used for speed.
const SPEED_STEP_DAYS: f64 = 0.01;

/// Series-model provider with no data files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticProvider;

impl AnalyticProvider {
    pub fn new() -> Self {
        Self
    }

    /// Position referred to the mean ecliptic and equinox of date, no flags.
    fn mean_of_date(body: Body, jd_ut: f64, apparent: bool) -> SphericalCoords {
        let t = jd_to_centuries(ut_to_tt(jd_ut));
        let precession = general_precession_longitude_deg(t);
        match body {
            Body::Sun => {
                let earth = earth_heliocentric(t);
                let mut s = cartesian_to_spherical(&scale(&earth, -1.0));
                s.lon_deg += precession;
                if apparent {
                    s.lon_deg -= ABERRATION_DEG / s.distance;
                }
                s.lon_deg = normalize_360(s.lon_deg);
                s
            }
            Body::Moon => {
                let mut m = moon_of_date(t);
                if apparent {
                    let tau = m.distance_km / AU_KM * LIGHT_TIME_DAYS_PER_AU;
                    m = moon_of_date(t - tau / 36_525.0);
                }
                SphericalCoords {
                    lon_deg: m.lon_deg,
                    lat_deg: m.lat_deg,
                    distance: m.distance_km / AU_KM,
                }
            }
            Body::MeanNode | Body::TrueNode => SphericalCoords {
                lon_deg: if body == Body::MeanNode {
                    mean_rahu_deg(t)
                } else {
                    true_rahu_deg(t)
                },
                lat_deg: 0.0,
                distance: MEAN_DISTANCE_KM / AU_KM,
            },
            Body::Mercury => planet_of_date(Orbit::Mercury, t, apparent),
            Body::Venus => planet_of_date(Orbit::Venus, t, apparent),
            Body::Mars => planet_of_date(Orbit::Mars, t, apparent),
            Body::Jupiter => planet_of_date(Orbit::Jupiter, t, apparent),
            Body::Saturn => planet_of_date(Orbit::Saturn, t, apparent),
            Body::Uranus => planet_of_date(Orbit::Uranus, t, apparent),
            Body::Neptune => planet_of_date(Orbit::Neptune, t, apparent),
            Body::Pluto => planet_of_date(Orbit::Pluto, t, apparent),
        }
    }

    fn flagged_longitude(body: Body, jd_ut: f64, flags: PositionFlags) -> f64 {
        let raw = Self::mean_of_date(body, jd_ut, flags.is_apparent());
        normalize_360(raw.lon_deg + flags.frame_offset_deg(jd_ut))
    }
}

impl PositionProvider for AnalyticProvider {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn coverage(&self) -> Coverage {
        Coverage::new(ANALYTIC_START_JD, ANALYTIC_END_JD)
    }

    fn position(
        &self,
        body: Body,
        jd_ut: f64,
        flags: PositionFlags,
    ) -> Result<EclipticPosition, EphemError> {
        self.coverage().check(jd_ut)?;
        let raw = Self::mean_of_date(body, jd_ut, flags.is_apparent());
        let speed = if flags.speed {
            let ahead = Self::flagged_longitude(body, jd_ut + SPEED_STEP_DAYS, flags);
            let behind = Self::flagged_longitude(body, jd_ut - SPEED_STEP_DAYS, flags);
            circular_distance(ahead, behind) / (2.0 * SPEED_STEP_DAYS)
        } else {
            0.0
        };
        Ok(EclipticPosition {
            lon_deg: normalize_360(raw.lon_deg + flags.frame_offset_deg(jd_ut)),
            lat_deg: raw.lat_deg,
            distance_au: raw.distance,
            speed_deg_per_day: speed,
        })
    }
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Geocentric planet, mean equinox of date.
fn planet_of_date(orbit: Orbit, t: f64, apparent: bool) -> SphericalCoords {
    let earth = earth_heliocentric(t);
    let mut geo = sub(&heliocentric_j2000(orbit, t), &earth);
    if apparent {
        let tau = norm(&geo) * LIGHT_TIME_DAYS_PER_AU;
        geo = sub(&heliocentric_j2000(orbit, t - tau / 36_525.0), &earth);
    }
    let mut s = cartesian_to_spherical(&geo);
    s.lon_deg = normalize_360(s.lon_deg + general_precession_longitude_deg(t));
    s
}

/// Heliocentric Earth (J2000 ecliptic, AU): barycentre minus the Moon's share.
fn earth_heliocentric(t: f64) -> [f64; 3] {
    let emb = heliocentric_j2000(Orbit::EarthMoon, t);
    let m = moon_of_date(t);
    let lon = (m.lon_deg - general_precession_longitude_deg(t)).to_radians();
    let lat = m.lat_deg.to_radians();
    let r = m.distance_km / AU_KM / (1.0 + EARTH_MOON_MASS_RATIO);
    let moon_share = [
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    ];
    sub(&emb, &moon_share)
}

fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: &[f64; 3], k: f64) -> [f64; 3] {
    [a[0] * k, a[1] * k, a[2] * k]
}

fn norm(a: &[f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{PositionKind, Zodiac};
    use gochara_vedic::AyanamshaSystem;

    const J2000: f64 = 2_451_545.0;

    fn lon(body: Body, jd: f64, flags: PositionFlags) -> f64 {
        AnalyticProvider.position(body, jd, flags).unwrap().lon_deg
    }

    #[test]
    fn apparent_sun_at_j2000() {
        let l = lon(Body::Sun, J2000, PositionFlags::default());
        assert!((l - 280.373).abs() < 0.02, "lon = {l}");
    }

    #[test]
    fn sun_at_march_2024_equinox() {
        // 2024-03-20 03:06 UT
        let jd = 2_460_389.5 + 3.1 / 24.0;
        let l = lon(Body::Sun, jd, PositionFlags::default());
        assert!(circular_distance(l, 0.0).abs() < 0.02, "lon = {l}");
    }

    #[test]
    fn out_of_range_rejected() {
        let err = AnalyticProvider
            .position(Body::Mars, ANALYTIC_END_JD + 1.0, PositionFlags::default())
            .unwrap_err();
        assert_eq!(err, EphemError::OutOfRange { jd_ut: ANALYTIC_END_JD + 1.0 });
        assert!(
            AnalyticProvider
                .position(Body::Sun, ANALYTIC_START_JD, PositionFlags::default())
                .is_ok()
        );
    }

    #[test]
    fn speed_off_reports_zero() {
        let flags = PositionFlags::default().with_speed(false);
        let p = AnalyticProvider.position(Body::Moon, J2000, flags).unwrap();
        assert_eq!(p.speed_deg_per_day, 0.0);
    }

    #[test]
    fn typical_speeds() {
        let flags = PositionFlags::default();
        let moon = AnalyticProvider.longitude(Body::Moon, J2000, flags).unwrap().1;
        assert!(moon > 11.5 && moon < 15.5, "moon = {moon}");
        let sun = AnalyticProvider.longitude(Body::Sun, J2000, flags).unwrap().1;
        assert!((sun - 1.019).abs() < 0.01, "sun = {sun}");
        let node = AnalyticProvider.longitude(Body::MeanNode, J2000, flags).unwrap().1;
        assert!((node + 0.05295).abs() < 1e-3, "node = {node}");
    }

    #[test]
    fn mercury_goes_retrograde_within_a_year() {
        let flags = PositionFlags::default();
        let retro = (0..365)
            .map(|d| AnalyticProvider.longitude(Body::Mercury, J2000 + d as f64, flags).unwrap().1)
            .any(|s| s < 0.0);
        assert!(retro);
    }

    #[test]
    fn sidereal_is_tropical_minus_ayanamsha() {
        let jd = 2_460_310.5;
        let trop = PositionFlags::default()
            .with_position(PositionKind::True)
            .with_nutation(false);
        let sid = trop.with_zodiac(Zodiac::Sidereal(AyanamshaSystem::Lahiri));
        let diff = circular_distance(lon(Body::Jupiter, jd, trop), lon(Body::Jupiter, jd, sid));
        assert!((diff - 24.188).abs() < 0.01, "diff = {diff}");
    }

    #[test]
    fn light_time_shifts_outer_planets_slightly() {
        let geo = PositionFlags::default().with_position(PositionKind::True);
        let app = PositionFlags::default();
        let d = circular_distance(lon(Body::Saturn, J2000, app), lon(Body::Saturn, J2000, geo));
        assert!(d.abs() > 1e-4 && d.abs() < 0.01, "d = {d}");
    }

    #[test]
    fn deterministic() {
        let f = PositionFlags::default();
        let a = AnalyticProvider.position(Body::Venus, 2_455_000.25, f).unwrap();
        let b = AnalyticProvider.position(Body::Venus, 2_455_000.25, f).unwrap();
        assert_eq!(a.lon_deg.to_bits(), b.lon_deg.to_bits());
        assert_eq!(a.speed_deg_per_day.to_bits(), b.speed_deg_per_day.to_bits());
    }
}
