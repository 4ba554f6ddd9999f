//! Geocentric ecliptic positions for the transit engine.
//!
//! Two interchangeable [`PositionProvider`] backends:
//! - [`AnalyticProvider`]: series models evaluated on every call
//! - [`TabulatedProvider`]: Chebyshev segments loaded from a `GCHT` file,
//!   built from any provider with [`TableBuilder`]
//!
//! [`Ephemeris`] wraps either backend as an explicitly closed session.

pub mod analytic;
pub mod body;
pub mod chebyshev;
pub mod error;
pub mod flags;
pub mod provider;
pub mod session;
pub mod table;

pub use analytic::{ANALYTIC_END_JD, ANALYTIC_START_JD, AnalyticProvider};
pub use body::{ALL_BODIES, Body};
pub use error::EphemError;
pub use flags::{PositionFlags, PositionKind, Zodiac};
pub use provider::{Coverage, EclipticPosition, PositionProvider};
pub use session::{Backend, Ephemeris, EphemerisConfig};
pub use table::builder::{SegmentSpec, TableBuilder};
pub use table::format::{BodySeries, Channel, ChebyshevTable};
pub use table::provider::TabulatedProvider;
