//! Error types for profile construction and registry lookups.

use crate::family::SpeedGrade;

/// Errors raised while building or looking up a constraint profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// The profile's range data is malformed (empty, inverted, zero divider, ...).
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// No primitive family is registered under this name.
    #[error("unknown primitive family '{0}'. Supported: cyclone_ii, spartan3_pll, spartan3_dcm")]
    UnknownFamily(String),

    /// The speed-grade string could not be parsed.
    #[error("invalid speed grade '{0}'")]
    InvalidSpeedGrade(String),

    /// The family exists but has no profile for this speed grade.
    #[error("{family} has no speed grade {speed_grade} (supported: {supported})")]
    UnknownSpeedGrade {
        /// Human-readable family name.
        family: &'static str,
        /// The requested speed grade.
        speed_grade: SpeedGrade,
        /// Comma-separated list of supported grades.
        supported: String,
    },
}
