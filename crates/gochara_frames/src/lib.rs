//! Angle and reference-frame helpers for ephemeris computations.
//!
//! Provides circular angle arithmetic, mean obliquity, IAU 2006 general
//! precession, a short nutation series, and Cartesian → spherical
//! conversion.

pub mod angle;
pub mod nutation;
pub mod obliquity;
pub mod precession;
pub mod spherical;

pub use angle::{circular_distance, is_genuine_crossing, normalize_360, unwrap_near};
pub use nutation::{
    FundamentalArgs, fundamental_arguments, nutation_longitude_deg, nutation_obliquity_deg,
    true_obliquity_deg,
};
pub use obliquity::{OBLIQUITY_J2000_DEG, mean_obliquity_deg};
pub use precession::{general_precession_longitude_arcsec, general_precession_longitude_deg};
pub use spherical::{SphericalCoords, cartesian_to_spherical};
