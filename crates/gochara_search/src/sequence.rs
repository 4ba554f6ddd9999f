//! Transit sequence generator.
//!
//! Drives [`solve_transit`] `count` times around one reference instant.
//! Under [`ChainPolicy::FromPrevious`] each direction walks outward one
//! boundary at a time from its own last event; under
//! [`ChainPolicy::FromReference`] every step is an independent query from the
//! reference instant and may be solved on scoped worker threads.

use std::num::NonZeroUsize;
use std::thread;

use gochara_ephem::PositionProvider;
use tracing::{info, warn};

use crate::error::TransitError;
use crate::sequence_types::{ChainPolicy, SequenceOutcome, SequenceRequest, StepFailure};
use crate::solver::solve_transit;
use crate::transit_types::{SearchDirection, SolverConfig, TransitEvent, TransitQuery, TransitTarget};

/// Generate a transit sequence.
///
/// Returns `Err` only for an invalid request or config. A failing step ends
/// the sequence: events from earlier steps are kept and the failure is
/// reported in [`SequenceOutcome::failure`].
pub fn generate_sequence(
    provider: &dyn PositionProvider,
    request: &SequenceRequest,
    config: &SolverConfig,
) -> Result<SequenceOutcome, TransitError> {
    config.validate().map_err(TransitError::InvalidConfig)?;
    request.validate().map_err(TransitError::InvalidConfig)?;

    let outcome = match request.chain {
        ChainPolicy::FromPrevious => chain_from_previous(provider, request, config),
        ChainPolicy::FromReference if request.parallel => {
            collect(request, solve_parallel(provider, request, config))
        }
        ChainPolicy::FromReference => collect(
            request,
            (0..request.count)
                .map(|k| Some(solve_step_from_reference(provider, request, config, k))),
        ),
    };

    match &outcome.failure {
        None => info!(
            body = %request.body,
            events = outcome.events.len(),
            rule = %request.rule,
            "transit sequence complete"
        ),
        Some(failure) => warn!(
            body = %request.body,
            step = failure.step,
            direction = %failure.direction,
            error = %failure.error,
            kept = outcome.events.len(),
            "transit sequence stopped early"
        ),
    }
    Ok(outcome)
}

fn step_query(request: &SequenceRequest, direction: SearchDirection, start_jd_ut: f64) -> TransitQuery {
    TransitQuery::new(
        request.body,
        request.flags,
        request.reference_deg,
        start_jd_ut,
        direction,
    )
}

fn chain_from_previous(
    provider: &dyn PositionProvider,
    request: &SequenceRequest,
    config: &SolverConfig,
) -> SequenceOutcome {
    let mut outcome = SequenceOutcome::default();
    let mut last_forward = request.start_jd_ut;
    let mut last_backward = request.start_jd_ut;

    for step in 0..request.count {
        let direction = request.rule.direction_at(step);
        let start = match direction {
            SearchDirection::Forward => last_forward,
            SearchDirection::Backward => last_backward,
        };
        match solve_transit(provider, &step_query(request, direction, start), config) {
            Ok(event) => {
                match direction {
                    SearchDirection::Forward => last_forward = event.jd_ut,
                    SearchDirection::Backward => last_backward = event.jd_ut,
                }
                outcome.events.push(event);
            }
            Err(error) => {
                outcome.failure = Some(StepFailure {
                    step,
                    direction,
                    error,
                });
                break;
            }
        }
    }
    outcome
}

fn solve_step_from_reference(
    provider: &dyn PositionProvider,
    request: &SequenceRequest,
    config: &SolverConfig,
    step: u32,
) -> Result<TransitEvent, TransitError> {
    let direction = request.rule.direction_at(step);
    // Bounded below 12 by SequenceRequest::validate.
    let ordinal = u8::try_from(request.rule.ordinal_at(step))
        .map_err(|_| TransitError::InvalidConfig("boundary ordinal out of range"))?;
    let query = step_query(request, direction, request.start_jd_ut)
        .with_target(TransitTarget::NextBoundary { ordinal });
    solve_transit(provider, &query, config)
}

/// Strided fan-out over scoped workers. Slot `k` holds step `k`'s result.
fn solve_parallel(
    provider: &dyn PositionProvider,
    request: &SequenceRequest,
    config: &SolverConfig,
) -> Vec<Option<Result<TransitEvent, TransitError>>> {
    let count = request.count as usize;
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .clamp(1, count.max(1));

    let mut slots: Vec<Option<Result<TransitEvent, TransitError>>> = vec![None; count];
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                scope.spawn(move || {
                    (w..count)
                        .step_by(workers)
                        .map(|k| (k, solve_step_from_reference(provider, request, config, k as u32)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(results) => {
                    for (k, result) in results {
                        slots[k] = Some(result);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });
    slots
}

/// Assemble step results in step order, stopping at the first failure.
fn collect(
    request: &SequenceRequest,
    results: impl IntoIterator<Item = Option<Result<TransitEvent, TransitError>>>,
) -> SequenceOutcome {
    let mut outcome = SequenceOutcome::default();
    for (step, slot) in (0u32..).zip(results) {
        let direction = request.rule.direction_at(step);
        let result = slot.unwrap_or(Err(TransitError::InvalidConfig("sequence step was not solved")));
        match result {
            Ok(event) => outcome.events.push(event),
            Err(error) => {
                outcome.failure = Some(StepFailure {
                    step,
                    direction,
                    error,
                });
                break;
            }
        }
    }
    outcome
}
