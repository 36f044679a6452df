//! Constraint profiles for FPGA clock-generation primitives.
//!
//! A [`ConstraintProfile`] describes the legal numeric ranges of one
//! primitive family at one speed grade: reference clock, VCO and output
//! frequency bands, the integer ranges of every counter, the number of output
//! taps, and the phase resolution of those taps. Profiles are plain data,
//! keyed by `(family, speed_grade)` and immutable once built.
//!
//! # Usage
//!
//! Use [`load_profile`] to look up a built-in profile by name:
//!
//! ```
//! use pllplan_profile::load_profile;
//!
//! let profile = load_profile("cyclone_ii", "-6").unwrap();
//! assert_eq!(profile.max_outputs(), 3);
//! ```
//!
//! User-defined primitives go through [`ConstraintProfile::builder`], which
//! applies the same validation as the built-in tables.

#![warn(missing_docs)]

pub mod error;
pub mod family;
pub mod intel;
pub mod profile;
pub mod xilinx;

pub use error::ProfileError;
pub use family::{Family, SpeedGrade, Vendor};
pub use profile::{ConstraintProfile, ProfileBuilder, DEFAULT_ACCEPTANCE_THRESHOLD};

/// Looks up the built-in profile for a family and speed grade.
///
/// Family names are case-insensitive and accept common aliases
/// (`"cyclone_ii"`, `"cyclone2"`, `"s3pll"`, ...). Speed grades accept
/// `"-6"`, `"6"` and `"C6"` spellings.
///
/// # Errors
///
/// Returns [`ProfileError::UnknownFamily`], [`ProfileError::InvalidSpeedGrade`]
/// or [`ProfileError::UnknownSpeedGrade`] if the key does not resolve.
pub fn load_profile(family: &str, speed_grade: &str) -> Result<ConstraintProfile, ProfileError> {
    let family: Family = family.parse()?;
    let speed_grade: SpeedGrade = speed_grade.parse()?;
    family.profile(speed_grade)
}

/// Builds every registered profile, in family then speed-grade order.
pub fn all_profiles() -> Result<Vec<ConstraintProfile>, ProfileError> {
    Family::ALL
        .iter()
        .flat_map(|family| family.speed_grades().iter().map(|&grade| family.profile(grade)))
        .collect()
}
