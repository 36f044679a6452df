//! Conformance test helpers for the pllplan frequency planner.
//!
//! Provides shorthand constructors for profiles and requests, a checker for
//! the invariants every solved configuration must satisfy, and a helper that
//! runs a whole `pllplan.toml` through load, resolve and parallel planning.

#![warn(missing_docs)]

use pllplan_common::Frequency;
use pllplan_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use pllplan_profile::ConstraintProfile;
use pllplan_solver::{ClockRequest, OutputSpec, PlanningError, SolvedConfiguration};

/// Result of planning every block of a configuration.
pub struct ProjectResult {
    /// Block names with their outcomes, in block-name order.
    pub blocks: Vec<(String, Result<SolvedConfiguration, PlanningError>)>,
    /// All diagnostics emitted, ordered by subject.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
}

impl ProjectResult {
    /// Looks up the outcome of the named block.
    pub fn block(&self, name: &str) -> Option<&Result<SolvedConfiguration, PlanningError>> {
        self.blocks.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }
}

/// Shorthand for a frequency in megahertz.
pub fn mhz(value: f64) -> Frequency {
    Frequency::from_mhz(value)
}

/// Loads a built-in profile, panicking if the key is unknown.
pub fn profile(family: &str, speed_grade: &str) -> ConstraintProfile {
    pllplan_profile::load_profile(family, speed_grade)
        .unwrap_or_else(|e| panic!("profile {family} {speed_grade}: {e}"))
}

/// Builds a request whose outputs occupy taps `0..targets.len()`.
pub fn request(input_mhz: f64, targets_mhz: &[f64]) -> ClockRequest {
    targets_mhz
        .iter()
        .enumerate()
        .fold(ClockRequest::new(mhz(input_mhz)), |req, (i, &t)| {
            req.with_output(OutputSpec::new(i, mhz(t)))
        })
}

/// Asserts every invariant a solved configuration must satisfy against its
/// profile and request.
pub fn assert_feasible(
    profile: &ConstraintProfile,
    request: &ClockRequest,
    config: &SolvedConfiguration,
) {
    let n = config.input_divider();
    let m = config.feedback_multiplier();
    assert!(profile.input_divider_range().contains(n), "N={n} out of range");
    assert!(profile.feedback_multiplier_range().contains(m), "M={m} out of range");
    assert_eq!(config.vco_freq(), request.input_freq.scale(m, n));
    assert!(
        profile.vco_freq_range().contains(config.vco_freq()),
        "VCO {} out of range",
        config.vco_freq()
    );
    assert_eq!(config.outputs().len(), request.outputs.len());

    let mut worst = 0.0f64;
    for spec in &request.outputs {
        let out = config
            .output(spec.index)
            .unwrap_or_else(|| panic!("output {} missing", spec.index));
        assert!(profile.output_divider_range().contains(out.divider));
        assert_eq!(out.actual_freq.hz(), config.vco_freq().hz() / f64::from(out.divider));
        assert!(profile.output_allowed(out.actual_freq));
        assert_eq!(out.target_freq, spec.target_freq);
        assert_eq!(out.relative_error, out.actual_freq.relative_error(spec.target_freq));
        assert!(out.relative_error <= profile.acceptance_threshold());
        assert_eq!(out.phase_degrees, spec.phase_degrees);
        assert_eq!(out.duty_cycle, spec.duty_cycle);
        worst = worst.max(out.relative_error);
    }
    assert_eq!(config.worst_error(), worst);
}

/// Smallest achievable worst-case error for `request` on `profile`, found by
/// enumerating every `N`, `M` and `C` with no ordering or early exit.
///
/// Returns `None` if no `(N, M)` pair gives a legal VCO with a legal divider
/// for every output.
pub fn exhaustive_best_error(profile: &ConstraintProfile, request: &ClockRequest) -> Option<f64> {
    let mut best: Option<f64> = None;
    for m in profile.feedback_multiplier_range().iter() {
        for n in profile.input_divider_range().iter() {
            let vco = request.input_freq.scale(m, n);
            if !profile.vco_freq_range().contains(vco) {
                continue;
            }
            let mut worst = Some(0.0f64);
            for spec in &request.outputs {
                let closest = profile
                    .output_divider_range()
                    .iter()
                    .map(|d| Frequency::new(vco.hz() / f64::from(d)))
                    .filter(|actual| profile.output_allowed(*actual))
                    .map(|actual| actual.relative_error(spec.target_freq))
                    .reduce(f64::min);
                worst = match (worst, closest) {
                    (Some(w), Some(e)) => Some(w.max(e)),
                    _ => None,
                };
            }
            if let Some(w) = worst {
                best = Some(best.map_or(w, |b| b.min(w)));
            }
        }
    }
    best
}

/// Loads `pllplan.toml` text, resolves its blocks and plans them in parallel.
///
/// Panics if the configuration itself is invalid.
pub fn plan_project(toml_text: &str) -> ProjectResult {
    let config = pllplan_config::load_config_from_str(toml_text)
        .unwrap_or_else(|e| panic!("invalid configuration: {e}"));
    let jobs = pllplan_config::resolve_blocks(&config)
        .unwrap_or_else(|e| panic!("unresolvable configuration: {e}"));

    let sink = DiagnosticSink::new();
    let results = pllplan_solver::plan_all(&jobs, &sink);

    let mut diagnostics = sink.take_all();
    diagnostics.sort_by(|a, b| a.subject.cmp(&b.subject));
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();

    ProjectResult {
        blocks: jobs.into_iter().map(|j| j.name).zip(results).collect(),
        diagnostics,
        error_count,
    }
}
