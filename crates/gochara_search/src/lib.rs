//! Transit search over a position provider.
//!
//! This crate provides:
//! - Reference resolution: natal ascendant, Moon, nodes or any body as a longitude
//! - Target longitude selection: the next 30° boundary measured from a reference
//! - The transit time solver: bracket, then Newton/bisection refinement
//! - Transit sequences alternating or running one way from a reference instant
//!
//! All searches take the provider explicitly as `&dyn PositionProvider`, so an
//! [`gochara_ephem::Ephemeris`] session, a bare analytic provider or a
//! tabulated one can be used interchangeably.

pub mod chart;
pub mod error;
pub mod reference;
pub mod sequence;
pub mod sequence_types;
pub mod solver;
pub mod target;
pub mod transit_types;

pub use chart::NatalChart;
pub use error::{SolvePhase, TransitError};
pub use reference::{ReferencePoint, resolve_reference};
pub use sequence::generate_sequence;
pub use sequence_types::{
    ChainPolicy, DirectionRule, SequenceOutcome, SequenceRequest, StepFailure,
};
pub use solver::{
    longitude_sense, next_sign_ingress, next_transit, prev_sign_ingress, prev_transit,
    resolve_target, solve_transit,
};
pub use target::{boundary_at, relative_sign_index, select_target, sign_start};
pub use transit_types::{
    SearchDirection, SolverConfig, TransitEvent, TransitQuery, TransitTarget,
};
