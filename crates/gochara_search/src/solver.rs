//! Transit time solver.
//!
//! Finds the instant a body's longitude crosses a target longitude in two
//! phases:
//! 1. **Bracketing**: step from the start instant in the search direction
//!    until the circular distance to the target changes sign. The step is
//!    derived from the body's mean motion and halved near stations.
//! 2. **Refining**: safeguarded Newton iteration inside the bracket using the
//!    provider's speed, falling back to bisection when the speed vanishes,
//!    a Newton step leaves the bracket, or progress stalls.
//!
//! Every loop is bounded by [`SolverConfig`]. No state survives a call, so
//! identical inputs give bit-identical results.

use gochara_ephem::{Body, PositionFlags, PositionProvider};
use gochara_frames::{circular_distance, is_genuine_crossing, normalize_360};
use gochara_vedic::Rashi;
use tracing::debug;

use crate::error::{SolvePhase, TransitError};
use crate::target::{boundary_at, sign_start};
use crate::transit_types::{
    SearchDirection, SolverConfig, TransitEvent, TransitQuery, TransitTarget,
};

/// Direction of longitude travel that `direction` in time maps to for a
/// body's usual motion. Nodes regress, so forward time walks backward
/// through the signs.
pub fn longitude_sense(body: Body, direction: SearchDirection) -> SearchDirection {
    if body.is_retrograde_by_default() {
        direction.opposite()
    } else {
        direction
    }
}

/// Absolute target longitude of `query` given the body's longitude at the
/// start instant.
pub fn resolve_target(query: &TransitQuery, start_lon_deg: f64, config: &SolverConfig) -> f64 {
    match query.target {
        TransitTarget::NextBoundary { ordinal } => boundary_at(
            start_lon_deg,
            query.reference_deg,
            longitude_sense(query.body, query.direction),
            ordinal,
            config.boundary_epsilon_deg,
        ),
        TransitTarget::Sign(rashi) => sign_start(query.reference_deg, rashi),
        TransitTarget::Longitude(lon) => normalize_360(lon),
    }
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Sample {
    t: f64,
    lon: f64,
    /// Circular distance lon − target.
    f: f64,
    speed: f64,
}

struct Sampler<'a> {
    provider: &'a dyn PositionProvider,
    body: Body,
    flags: PositionFlags,
    target: f64,
}

impl Sampler<'_> {
    fn at(&self, t: f64) -> Result<Sample, TransitError> {
        let (lon, speed) = self.provider.longitude(self.body, t, self.flags)?;
        Ok(Sample {
            t,
            lon,
            f: circular_distance(lon, self.target),
            speed,
        })
    }
}

// ---------------------------------------------------------------------------
// Bracketing
// ---------------------------------------------------------------------------

/// Step in days at a sample with speed `speed`, halved toward the minimum
/// while the body is slow relative to its mean motion.
fn scan_step_days(body: Body, speed: f64, config: &SolverConfig) -> f64 {
    let mut step = config.base_step_days(body);
    if !body.has_stations() {
        return step;
    }
    let mut limit = config.station_speed_ratio * body.mean_motion_deg_per_day();
    while speed.abs() < limit && step > config.min_step_days {
        step *= 0.5;
        limit *= 0.5;
    }
    step.max(config.min_step_days)
}

enum Bracket {
    /// Sample already within tolerance of the target.
    Hit(Sample),
    /// Samples on opposite sides of the target, earlier first.
    Span(Sample, Sample),
}

struct BracketResult {
    bracket: Bracket,
    steps: u32,
}

fn find_bracket(
    sampler: &Sampler<'_>,
    start: Sample,
    direction: SearchDirection,
    config: &SolverConfig,
) -> Result<BracketResult, TransitError> {
    let window = config.scan_window_days(sampler.body);
    let sign = direction.sign();
    // A start sitting on the target is not a solution.
    let mut skip = start.f.abs() <= config.boundary_epsilon_deg;
    let mut prev = start;
    let mut steps = 0u32;

    loop {
        if steps >= config.max_bracket_steps || (prev.t - start.t).abs() > window {
            return Err(TransitError::Convergence {
                phase: SolvePhase::Bracketing,
                iterations: steps,
                residual_deg: prev.f.abs(),
            });
        }
        steps += 1;

        let step = scan_step_days(sampler.body, prev.speed, config);
        let curr = sampler.at(prev.t + sign * step)?;

        let first = skip;
        skip = false;
        if !first {
            if curr.f.abs() < config.tolerance_deg {
                return Ok(BracketResult {
                    bracket: Bracket::Hit(curr),
                    steps,
                });
            }
            if is_genuine_crossing(prev.f, curr.f) {
                return Ok(BracketResult {
                    bracket: span(prev, curr),
                    steps,
                });
            }
        }

        // A station inside the step can hide a pair of crossings.
        if prev.speed * curr.speed < 0.0 {
            let station = locate_station(sampler, prev, curr, config)?;
            if station.f.abs() < config.tolerance_deg {
                return Ok(BracketResult {
                    bracket: Bracket::Hit(station),
                    steps,
                });
            }
            if !first && is_genuine_crossing(prev.f, station.f) {
                return Ok(BracketResult {
                    bracket: span(prev, station),
                    steps,
                });
            }
            if is_genuine_crossing(station.f, curr.f) {
                return Ok(BracketResult {
                    bracket: span(station, curr),
                    steps,
                });
            }
        }
        prev = curr;
    }
}

fn span(a: Sample, b: Sample) -> Bracket {
    if a.t < b.t { Bracket::Span(a, b) } else { Bracket::Span(b, a) }
}

/// Bisect on the sign of the speed between two samples moving in opposite
/// senses, down to `min_step_days`.
fn locate_station(
    sampler: &Sampler<'_>,
    mut a: Sample,
    mut b: Sample,
    config: &SolverConfig,
) -> Result<Sample, TransitError> {
    for _ in 0..config.max_refine_iterations {
        if (b.t - a.t).abs() <= config.min_step_days {
            break;
        }
        let mid = sampler.at(0.5 * (a.t + b.t))?;
        if mid.speed * a.speed > 0.0 {
            a = mid;
        } else {
            b = mid;
        }
    }
    sampler.at(0.5 * (a.t + b.t))
}

// ---------------------------------------------------------------------------
// Refinement
// ---------------------------------------------------------------------------

/// Converge inside `[a, b]`; returns the final sample and iteration count.
fn refine(
    sampler: &Sampler<'_>,
    mut a: Sample,
    mut b: Sample,
    config: &SolverConfig,
) -> Result<(Sample, u32), TransitError> {
    // Start from the endpoint nearer the target.
    let nearer = if a.f.abs() < b.f.abs() { a } else { b };
    let mut t = next_estimate(&nearer, &a, &b, config, true);
    let mut last_abs = nearer.f.abs();

    for iteration in 1..=config.max_refine_iterations {
        let s = sampler.at(t)?;
        if s.f.abs() < config.tolerance_deg {
            return Ok((s, iteration));
        }
        if s.f.signum() == a.f.signum() {
            a = s;
        } else {
            b = s;
        }
        // Bisect when Newton failed to halve the residual.
        let newton_ok = s.f.abs() <= 0.5 * last_abs;
        last_abs = s.f.abs();
        t = next_estimate(&s, &a, &b, config, newton_ok);
    }

    Err(TransitError::Convergence {
        phase: SolvePhase::Refining,
        iterations: config.max_refine_iterations,
        residual_deg: last_abs,
    })
}

fn next_estimate(s: &Sample, a: &Sample, b: &Sample, config: &SolverConfig, allow_newton: bool) -> f64 {
    let mid = 0.5 * (a.t + b.t);
    if !allow_newton || s.speed.abs() < config.station_speed_epsilon {
        return mid;
    }
    let newton = s.t - s.f / s.speed;
    if newton > a.t && newton < b.t { newton } else { mid }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Solve one transit query.
///
/// Fails with [`TransitError::Computation`] (or `ClosedResource`) when the
/// provider fails, and with [`TransitError::Convergence`] when a budget in
/// `config` runs out.
pub fn solve_transit(
    provider: &dyn PositionProvider,
    query: &TransitQuery,
    config: &SolverConfig,
) -> Result<TransitEvent, TransitError> {
    config.validate().map_err(TransitError::InvalidConfig)?;
    query.validate().map_err(TransitError::InvalidConfig)?;

    // The solver always needs the rate; the query's flag only governs reporting.
    let flags = query.flags.with_speed(true);
    let (start_lon, start_speed) = provider.longitude(query.body, query.start_jd_ut, flags)?;
    let target = resolve_target(query, start_lon, config);

    let sampler = Sampler {
        provider,
        body: query.body,
        flags,
        target,
    };
    let start = Sample {
        t: query.start_jd_ut,
        lon: start_lon,
        f: circular_distance(start_lon, target),
        speed: start_speed,
    };

    let BracketResult { bracket, steps } = find_bracket(&sampler, start, query.direction, config)?;
    let (hit, iterations) = match bracket {
        Bracket::Hit(s) => (s, 0),
        Bracket::Span(a, b) => refine(&sampler, a, b, config)?,
    };

    debug!(
        body = %query.body,
        target_deg = target,
        jd_ut = hit.t,
        bracket_steps = steps,
        iterations,
        "transit solved"
    );

    Ok(TransitEvent {
        jd_ut: hit.t,
        body: query.body,
        crossed_lon_deg: target,
        direction: query.direction,
        observed_lon_deg: hit.lon,
        speed_deg_per_day: if query.flags.speed { hit.speed } else { 0.0 },
        bracket_steps: steps,
        iterations,
    })
}

/// Next crossing of the adjacent boundary after `jd_ut`.
pub fn next_transit(
    provider: &dyn PositionProvider,
    body: Body,
    flags: PositionFlags,
    reference_deg: f64,
    jd_ut: f64,
    config: &SolverConfig,
) -> Result<TransitEvent, TransitError> {
    let query = TransitQuery::new(body, flags, reference_deg, jd_ut, SearchDirection::Forward);
    solve_transit(provider, &query, config)
}

/// Previous crossing of the adjacent boundary before `jd_ut`.
pub fn prev_transit(
    provider: &dyn PositionProvider,
    body: Body,
    flags: PositionFlags,
    reference_deg: f64,
    jd_ut: f64,
    config: &SolverConfig,
) -> Result<TransitEvent, TransitError> {
    let query = TransitQuery::new(body, flags, reference_deg, jd_ut, SearchDirection::Backward);
    solve_transit(provider, &query, config)
}

/// Next instant the body reaches the start of `rashi` (counted from
/// `reference_deg`) after `jd_ut`.
pub fn next_sign_ingress(
    provider: &dyn PositionProvider,
    body: Body,
    flags: PositionFlags,
    reference_deg: f64,
    rashi: Rashi,
    jd_ut: f64,
    config: &SolverConfig,
) -> Result<TransitEvent, TransitError> {
    let query = TransitQuery::new(body, flags, reference_deg, jd_ut, SearchDirection::Forward)
        .with_target(TransitTarget::Sign(rashi));
    solve_transit(provider, &query, config)
}

/// Previous instant the body was at the start of `rashi` before `jd_ut`.
pub fn prev_sign_ingress(
    provider: &dyn PositionProvider,
    body: Body,
    flags: PositionFlags,
    reference_deg: f64,
    rashi: Rashi,
    jd_ut: f64,
    config: &SolverConfig,
) -> Result<TransitEvent, TransitError> {
    let query = TransitQuery::new(body, flags, reference_deg, jd_ut, SearchDirection::Backward)
        .with_target(TransitTarget::Sign(rashi));
    solve_transit(provider, &query, config)
}
