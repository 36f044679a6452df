//! Planning named clocking blocks with diagnostics.

use crate::error::PlanningError;
use crate::request::ClockRequest;
use crate::search::solve;
use crate::solution::SolvedConfiguration;
use pllplan_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use pllplan_profile::ConstraintProfile;
use rayon::prelude::*;

/// Code of the note emitted for a block planned within [`APPROXIMATE_ABOVE`].
pub const PLANNED: DiagnosticCode = DiagnosticCode::new(Category::Note, 1);

/// Code of the warning emitted for a block whose best configuration misses a
/// target by more than [`APPROXIMATE_ABOVE`] while staying within the
/// acceptance threshold.
pub const APPROXIMATE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

/// Worst relative error (1 ppm) above which a planned block is reported as
/// approximate.
pub const APPROXIMATE_ABOVE: f64 = 1e-6;

/// One clocking block to plan: a name for reporting, the primitive's profile,
/// and the request.
#[derive(Debug, Clone)]
pub struct PlanJob {
    /// Name of the clocking block, used as the diagnostic subject.
    pub name: String,
    /// Profile of the primitive implementing the block.
    pub profile: ConstraintProfile,
    /// The clocks the block must produce.
    pub request: ClockRequest,
}

impl PlanJob {
    /// Creates a job.
    pub fn new(name: impl Into<String>, profile: ConstraintProfile, request: ClockRequest) -> Self {
        Self {
            name: name.into(),
            profile,
            request,
        }
    }
}

/// Solves one named block and reports the outcome into `sink`.
///
/// On success a note with one line per output is emitted, or a warning if the
/// configuration is approximate; on failure an error carrying the failure's
/// code and a help line, if any.
pub fn plan(
    name: &str,
    profile: &ConstraintProfile,
    request: &ClockRequest,
    sink: &DiagnosticSink,
) -> Result<SolvedConfiguration, PlanningError> {
    match solve(profile, request) {
        Ok(config) => {
            sink.emit(success_diagnostic(name, profile, &config));
            Ok(config)
        }
        Err(err) => {
            let mut diag = Diagnostic::error(err.code(), err.to_string())
                .with_subject(name)
                .with_note(format!("primitive: {}", profile.name()));
            if let Some(help) = err.help() {
                diag = diag.with_help(help);
            }
            sink.emit(diag);
            Err(err)
        }
    }
}

fn success_diagnostic(
    name: &str,
    profile: &ConstraintProfile,
    config: &SolvedConfiguration,
) -> Diagnostic {
    let message = format!(
        "planned on {}: N={} M={} VCO {}, worst error {:.4}%",
        config.profile_name(),
        config.input_divider(),
        config.feedback_multiplier(),
        config.vco_freq(),
        config.worst_error() * 100.0
    );
    let mut diag = if config.worst_error() > APPROXIMATE_ABOVE {
        Diagnostic::warning(APPROXIMATE, message).with_help(format!(
            "no exact configuration exists; accepted within the {:.4}% threshold",
            profile.acceptance_threshold() * 100.0
        ))
    } else {
        Diagnostic::note(PLANNED, message)
    }
    .with_subject(name);
    for out in config.outputs() {
        diag = diag.with_note(format!(
            "out{}: C={} {} (target {}, error {:.4}%)",
            out.index,
            out.divider,
            out.actual_freq,
            out.target_freq,
            out.relative_error * 100.0
        ));
    }
    diag
}

/// Plans independent blocks in parallel.
///
/// Results are returned in the order of `jobs`. Each block is solved in
/// isolation, so a failing block never affects the others; the order in which
/// diagnostics reach `sink` is unspecified.
pub fn plan_all(
    jobs: &[PlanJob],
    sink: &DiagnosticSink,
) -> Vec<Result<SolvedConfiguration, PlanningError>> {
    jobs.par_iter()
        .map(|job| plan(&job.name, &job.profile, &job.request, sink))
        .collect()
}
