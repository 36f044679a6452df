//! Exhaustive divider search.
//!
//! For every feedback multiplier `M` (ascending) and input divider `N`
//! (ascending) whose VCO frequency `input * M / N` is legal, each requested
//! output independently takes the output divider `C` that lands closest to its
//! target. The candidate is scored by its worst output error and the lowest
//! score wins. Because the loops run in a fixed order and a later candidate
//! must be strictly better to replace an earlier one, ties resolve to the
//! smallest `M`, then the smallest `N`.

use crate::error::PlanningError;
use crate::request::{ClockRequest, OutputSpec};
use crate::solution::{OutputConfig, SolvedConfiguration};
use pllplan_common::Frequency;
use pllplan_profile::ConstraintProfile;

/// Upper bound on the number of inner-loop steps a single search may take.
pub const SEARCH_BUDGET: u64 = 50_000_000;

/// Errors closer than this are considered equal when comparing candidates.
const TIE_EPSILON: f64 = 1e-12;

/// Tolerance in degrees when checking a phase against its resolution.
const PHASE_TOLERANCE: f64 = 1e-6;

/// Finds the configuration of `profile` that best serves `request`.
///
/// The result minimizes the largest relative frequency error over all
/// requested outputs. The function is pure: it never touches shared state and
/// returns the same configuration for the same inputs.
///
/// # Errors
///
/// Checks run in this order, and the first failure is returned:
///
/// 1. [`PlanningError::InputFrequencyOutOfRange`] if the reference clock is
///    outside the profile's input range.
/// 2. [`PlanningError::TooManyOutputs`] if more outputs are requested than the
///    primitive has.
/// 3. [`PlanningError::InvalidRequest`] if an output is malformed.
/// 4. [`PlanningError::SearchBudgetExceeded`] if the profile's ranges are too
///    wide to search.
/// 5. [`PlanningError::NoFeasibleConfiguration`] if no candidate is within the
///    acceptance threshold.
/// 6. [`PlanningError::UnachievablePhase`] if the winning candidate cannot
///    realize a requested phase.
pub fn solve(
    profile: &ConstraintProfile,
    request: &ClockRequest,
) -> Result<SolvedConfiguration, PlanningError> {
    let input = request.input_freq;
    let input_range = profile.input_freq_range();
    if !input_range.contains(input) {
        return Err(PlanningError::InputFrequencyOutOfRange {
            input,
            range: input_range,
        });
    }

    let max = profile.max_outputs();
    if request.outputs.len() > max {
        return Err(PlanningError::TooManyOutputs {
            requested: request.outputs.len(),
            max,
        });
    }

    request.validate(max)?;

    let steps = search_steps(profile, request.outputs.len());
    if steps > SEARCH_BUDGET {
        return Err(PlanningError::SearchBudgetExceeded {
            steps,
            budget: SEARCH_BUDGET,
        });
    }

    let threshold = profile.acceptance_threshold();
    let best = match search(profile, request) {
        Some(best) if best.worst <= threshold => best,
        other => {
            return Err(PlanningError::NoFeasibleConfiguration {
                best_error: other.map(|c| c.worst),
                threshold,
            })
        }
    };

    for out in &best.outputs {
        check_phase(profile, out)?;
    }

    Ok(SolvedConfiguration::new(
        profile.name(),
        input,
        best.input_divider,
        best.feedback_multiplier,
        best.vco,
        best.outputs,
    ))
}

/// Worst-case inner-loop steps: one VCO check per `(N, M)` pair plus a full
/// divider scan per output.
fn search_steps(profile: &ConstraintProfile, outputs: usize) -> u64 {
    let pairs = profile
        .input_divider_range()
        .len()
        .saturating_mul(profile.feedback_multiplier_range().len());
    let per_pair = (outputs as u64)
        .saturating_mul(profile.output_divider_range().len())
        .saturating_add(1);
    pairs.saturating_mul(per_pair)
}

struct Candidate {
    input_divider: u32,
    feedback_multiplier: u32,
    vco: Frequency,
    outputs: Vec<OutputConfig>,
    worst: f64,
}

fn search(profile: &ConstraintProfile, request: &ClockRequest) -> Option<Candidate> {
    let vco_range = profile.vco_freq_range();
    let mut best: Option<Candidate> = None;

    for m in profile.feedback_multiplier_range().iter() {
        for n in profile.input_divider_range().iter() {
            let vco = request.input_freq.scale(m, n);
            if !vco_range.contains(vco) {
                continue;
            }

            let Some(outputs) = request
                .outputs
                .iter()
                .map(|spec| best_divider(profile, vco, spec))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            let worst = outputs
                .iter()
                .map(|o| o.relative_error)
                .fold(0.0, f64::max);
            let improves = best
                .as_ref()
                .map_or(true, |b| worst < b.worst - TIE_EPSILON);
            if improves {
                best = Some(Candidate {
                    input_divider: n,
                    feedback_multiplier: m,
                    vco,
                    outputs,
                    worst,
                });
                if worst <= TIE_EPSILON {
                    return best;
                }
            }
        }
    }
    best
}

/// Picks the legal output divider closest to `spec`'s target, preferring the
/// smallest divider on ties. Returns `None` if no divider yields a legal
/// output frequency.
fn best_divider(
    profile: &ConstraintProfile,
    vco: Frequency,
    spec: &OutputSpec,
) -> Option<OutputConfig> {
    let mut best: Option<OutputConfig> = None;
    for d in profile.output_divider_range().iter() {
        let actual = Frequency::new(vco.hz() / f64::from(d));
        if !profile.output_allowed(actual) {
            continue;
        }
        let error = actual.relative_error(spec.target_freq);
        if best.as_ref().map_or(true, |b| error < b.relative_error) {
            best = Some(OutputConfig {
                index: spec.index,
                divider: d,
                target_freq: spec.target_freq,
                actual_freq: actual,
                relative_error: error,
                phase_degrees: spec.phase_degrees,
                duty_cycle: spec.duty_cycle,
            });
        }
    }
    best
}

fn check_phase(profile: &ConstraintProfile, out: &OutputConfig) -> Result<(), PlanningError> {
    // Without phase taps only a zero shift is realizable.
    let step = profile.phase_step(out.divider).unwrap_or(360.0);
    let nearest = (out.phase_degrees / step).round() * step;
    if (out.phase_degrees - nearest).abs() > PHASE_TOLERANCE {
        return Err(PlanningError::UnachievablePhase {
            index: out.index,
            phase: out.phase_degrees,
            step,
        });
    }
    Ok(())
}
