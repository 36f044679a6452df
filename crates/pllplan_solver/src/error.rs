//! Planning failures.

use pllplan_common::{Frequency, FrequencyRange};
use pllplan_diagnostics::{Category, DiagnosticCode};

/// Why a clock request could not be planned.
///
/// Every variant is terminal: the solver is a pure function, so retrying with
/// the same inputs cannot change the outcome. No configuration is returned
/// alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    /// The reference clock lies outside the primitive's legal input band.
    #[error("input frequency {input} is outside the legal range {range}")]
    InputFrequencyOutOfRange {
        /// The supplied reference frequency.
        input: Frequency,
        /// The profile's input range.
        range: FrequencyRange,
    },

    /// More outputs were requested than the primitive has taps.
    #[error("{requested} outputs requested but the primitive has only {max}")]
    TooManyOutputs {
        /// Number of requested outputs.
        requested: usize,
        /// Number of taps on the primitive.
        max: usize,
    },

    /// No integer combination meets the acceptance threshold.
    #[error("no feasible configuration: {}", describe_best(*.best_error, *.threshold))]
    NoFeasibleConfiguration {
        /// Smallest worst-case relative error found, if any candidate existed.
        best_error: Option<f64>,
        /// The profile's acceptance threshold.
        threshold: f64,
    },

    /// A requested phase is not a multiple of the output's phase resolution.
    #[error("output {index}: phase {phase}° is not a multiple of the {step}° resolution")]
    UnachievablePhase {
        /// Output tap index.
        index: usize,
        /// Requested phase in degrees.
        phase: f64,
        /// Phase resolution of the chosen divider, in degrees.
        step: f64,
    },

    /// The profile's ranges are too wide to search exhaustively.
    #[error("search would take {steps} steps, exceeding the budget of {budget}")]
    SearchBudgetExceeded {
        /// Worst-case number of search steps for this request.
        steps: u64,
        /// The fixed step budget.
        budget: u64,
    },

    /// The request itself is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn describe_best(best_error: Option<f64>, threshold: f64) -> String {
    match best_error {
        Some(err) => format!(
            "best worst-case error {:.4}% exceeds the {:.4}% threshold",
            err * 100.0,
            threshold * 100.0
        ),
        None => "no divider combination reaches a legal VCO and output frequency".to_string(),
    }
}

impl PlanningError {
    /// Returns the stable diagnostic code for this failure.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            Self::InputFrequencyOutOfRange { .. } => 1,
            Self::TooManyOutputs { .. } => 2,
            Self::NoFeasibleConfiguration { .. } => 3,
            Self::UnachievablePhase { .. } => 4,
            Self::SearchBudgetExceeded { .. } => 5,
            Self::InvalidRequest(_) => 6,
        };
        DiagnosticCode::new(Category::Error, number)
    }

    /// Returns a suggestion for the user, if one applies.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::InputFrequencyOutOfRange { .. } => {
                Some("supply a reference clock inside the primitive's input range")
            }
            Self::TooManyOutputs { .. } => {
                Some("split the outputs across several clocking primitives")
            }
            Self::NoFeasibleConfiguration { .. } => {
                Some("relax the output frequencies or choose a different reference clock")
            }
            Self::UnachievablePhase { .. } => {
                Some("round the phase to a multiple of the reported resolution")
            }
            Self::SearchBudgetExceeded { .. } => {
                Some("narrow the divider and multiplier ranges of the profile")
            }
            Self::InvalidRequest(_) => None,
        }
    }
}
