//! Time helpers for the transit engine.
//!
//! This crate provides:
//! - Julian Day ↔ Gregorian calendar conversion
//! - ΔT (TT − UT) for converting the UT instants the engine works in
//!   to the dynamical time the ephemeris models expect
//! - Greenwich and local mean sidereal time
//! - [`CivilTime`], a UT calendar timestamp with parsing and formatting

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use civil::CivilTime;
pub use delta_t::{delta_t_seconds, tt_to_ut, ut_to_tt};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, calendar_to_jd, decimal_year, jd_to_calendar, jd_to_centuries,
};
pub use sidereal::{gmst_rad, local_sidereal_time_rad};
