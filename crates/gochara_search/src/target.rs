//! Target longitude selection.
//!
//! Sign boundaries are measured from a natal reference longitude: relative
//! sign `s` spans `[ref + 30s, ref + 30(s+1))`. The selector never returns a
//! boundary the body is already sitting on; within `epsilon_deg` of an edge
//! the next edge in the direction of motion is chosen.

use gochara_frames::normalize_360;
use gochara_vedic::{RASHI_SPAN_DEG, Rashi};

use crate::transit_types::SearchDirection;

/// Relative sign index in [0, 11] of `lon_deg` measured from `reference_deg`.
pub fn relative_sign_index(lon_deg: f64, reference_deg: f64) -> u8 {
    let rel = normalize_360(lon_deg - reference_deg);
    ((rel / RASHI_SPAN_DEG).floor() as u8).min(11)
}

/// Adjacent boundary in the `toward` direction of longitude.
///
/// Forward picks the end edge of the current relative sign, backward its
/// start edge. Returns an absolute longitude in [0, 360).
pub fn select_target(
    lon_deg: f64,
    reference_deg: f64,
    toward: SearchDirection,
    epsilon_deg: f64,
) -> f64 {
    boundary_at(lon_deg, reference_deg, toward, 0, epsilon_deg)
}

/// The `ordinal`-th boundary in the `toward` direction (0 = adjacent edge).
pub fn boundary_at(
    lon_deg: f64,
    reference_deg: f64,
    toward: SearchDirection,
    ordinal: u8,
    epsilon_deg: f64,
) -> f64 {
    let rel = normalize_360(lon_deg - reference_deg);
    let s = i32::from(relative_sign_index(lon_deg, reference_deg));
    let n = i32::from(ordinal);
    let edge = match toward {
        SearchDirection::Forward => {
            let end = s + 1;
            let gap = f64::from(end) * RASHI_SPAN_DEG - rel;
            if gap <= epsilon_deg { end + 1 + n } else { end + n }
        }
        SearchDirection::Backward => {
            let gap = rel - f64::from(s) * RASHI_SPAN_DEG;
            if gap <= epsilon_deg { s - 1 - n } else { s - n }
        }
    };
    normalize_360(reference_deg + f64::from(edge.rem_euclid(12)) * RASHI_SPAN_DEG)
}

/// Absolute longitude of the start edge of `rashi` counted from `reference_deg`.
pub fn sign_start(reference_deg: f64, rashi: Rashi) -> f64 {
    normalize_360(reference_deg + rashi.start_deg())
}
