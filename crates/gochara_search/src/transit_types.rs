//! Types for transit queries, events and solver configuration.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gochara_ephem::{Body, PositionFlags};
use gochara_frames::normalize_360;
use gochara_vedic::{Rashi, rashi_from_longitude};
use serde::{Deserialize, Serialize};

/// Time direction of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    /// +1.0 for forward, -1.0 for backward.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl Display for SearchDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Backward => f.write_str("backward"),
        }
    }
}

impl FromStr for SearchDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "next" | "f" => Ok(Self::Forward),
            "backward" | "prev" | "previous" | "b" => Ok(Self::Backward),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// What longitude a query is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitTarget {
    /// Adjacent 30° boundary in the search direction, `ordinal` boundaries
    /// further out (0 = adjacent).
    NextBoundary { ordinal: u8 },
    /// Start edge of a sign, counted from the reference longitude.
    Sign(Rashi),
    /// An absolute longitude in the query's zodiac.
    Longitude(f64),
}

impl TransitTarget {
    pub const ADJACENT: Self = Self::NextBoundary { ordinal: 0 };
}

/// One transit search. A value object: build, solve, discard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitQuery {
    pub body: Body,
    pub flags: PositionFlags,
    /// Natal reference longitude that sign boundaries are measured from.
    pub reference_deg: f64,
    pub target: TransitTarget,
    pub start_jd_ut: f64,
    pub direction: SearchDirection,
}

impl TransitQuery {
    /// Adjacent-boundary query.
    pub fn new(
        body: Body,
        flags: PositionFlags,
        reference_deg: f64,
        start_jd_ut: f64,
        direction: SearchDirection,
    ) -> Self {
        Self {
            body,
            flags,
            reference_deg,
            target: TransitTarget::ADJACENT,
            start_jd_ut,
            direction,
        }
    }

    pub fn with_target(self, target: TransitTarget) -> Self {
        Self { target, ..self }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.start_jd_ut.is_finite() {
            return Err("start instant must be finite");
        }
        if !self.reference_deg.is_finite() {
            return Err("reference longitude must be finite");
        }
        match self.target {
            TransitTarget::NextBoundary { ordinal } if ordinal >= 12 => {
                Err("boundary ordinal must be below 12")
            }
            TransitTarget::Longitude(lon) if !lon.is_finite() => {
                Err("target longitude must be finite")
            }
            _ => Ok(()),
        }
    }
}

/// A solved crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitEvent {
    /// Instant of the crossing, UT Julian Day.
    pub jd_ut: f64,
    pub body: Body,
    /// Target longitude that was crossed, [0, 360).
    pub crossed_lon_deg: f64,
    pub direction: SearchDirection,
    /// Body longitude at `jd_ut`; within tolerance of `crossed_lon_deg`.
    pub observed_lon_deg: f64,
    /// Longitude rate at `jd_ut`; 0.0 when the query's speed flag is off.
    pub speed_deg_per_day: f64,
    /// Coarse scan samples taken before the bracket was found.
    pub bracket_steps: u32,
    /// Refinement iterations.
    pub iterations: u32,
}

impl TransitEvent {
    /// Sign whose start edge, measured from `reference_deg`, is the crossed longitude.
    pub fn boundary_sign(&self, reference_deg: f64) -> Rashi {
        // Half a degree of slack absorbs the solver tolerance at the edge.
        rashi_from_longitude(normalize_360(self.crossed_lon_deg - reference_deg) + 0.5).rashi
    }
}

/// Solver tuning. Every loop it drives is bounded by these numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Converged when |circular distance| to the target is below this, degrees.
    pub tolerance_deg: f64,
    /// A start this close to a boundary selects the next one, degrees.
    pub boundary_epsilon_deg: f64,
    /// Coarse step as degrees of mean motion.
    pub scan_step_deg: f64,
    pub min_step_days: f64,
    pub max_step_days: f64,
    /// Near-station threshold as a fraction of mean motion; the step halves below it.
    pub station_speed_ratio: f64,
    /// Below this |speed| (deg/day) Newton steps are not attempted.
    pub station_speed_epsilon: f64,
    /// Scan window in units of one sign's mean transit time (plus 400 days).
    pub scan_window_factor: f64,
    pub max_bracket_steps: u32,
    pub max_refine_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: 1e-5,
            boundary_epsilon_deg: 1e-4,
            scan_step_deg: 1.0,
            min_step_days: 0.01,
            max_step_days: 10.0,
            station_speed_ratio: 0.1,
            station_speed_epsilon: 1e-6,
            scan_window_factor: 2.0,
            max_bracket_steps: 20_000,
            max_refine_iterations: 100,
        }
    }
}

impl SolverConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.tolerance_deg) || self.tolerance_deg >= 1.0 {
            return Err("tolerance_deg must be in (0, 1)");
        }
        if !positive(self.boundary_epsilon_deg) || self.boundary_epsilon_deg >= 15.0 {
            return Err("boundary_epsilon_deg must be in (0, 15)");
        }
        if self.boundary_epsilon_deg < self.tolerance_deg {
            return Err("boundary_epsilon_deg must not be below tolerance_deg");
        }
        if !positive(self.scan_step_deg) {
            return Err("scan_step_deg must be positive");
        }
        if !positive(self.min_step_days) || !positive(self.max_step_days) {
            return Err("step bounds must be positive");
        }
        if self.min_step_days > self.max_step_days {
            return Err("min_step_days must not exceed max_step_days");
        }
        if !(self.station_speed_ratio.is_finite() && self.station_speed_ratio >= 0.0) {
            return Err("station_speed_ratio must be non-negative");
        }
        if !(self.station_speed_epsilon.is_finite() && self.station_speed_epsilon >= 0.0) {
            return Err("station_speed_epsilon must be non-negative");
        }
        if !positive(self.scan_window_factor) {
            return Err("scan_window_factor must be positive");
        }
        if self.max_bracket_steps == 0 {
            return Err("max_bracket_steps must be > 0");
        }
        if self.max_refine_iterations == 0 {
            return Err("max_refine_iterations must be > 0");
        }
        Ok(())
    }

    /// Scan window for `body`, days.
    pub fn scan_window_days(&self, body: Body) -> f64 {
        self.scan_window_factor * 30.0 / body.mean_motion_deg_per_day() + 400.0
    }

    /// Coarse step for `body` before station shrinking, days.
    pub fn base_step_days(&self, body: Body) -> f64 {
        (self.scan_step_deg / body.mean_motion_deg_per_day())
            .clamp(self.min_step_days, self.max_step_days)
    }
}
