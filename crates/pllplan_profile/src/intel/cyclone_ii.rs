//! Intel Cyclone II PLL constraint profiles.
//!
//! The Cyclone II PLL divides the reference by `N`, multiplies it by `M` in
//! the feedback loop, and feeds three post-scale `C` counters from the shared
//! VCO. Each `C` counter can start on any of eight VCO phase taps, so the
//! phase resolution of an output is `360° / (8 * C)`.
//!
//! The VCO, counter, and multiplier limits are common to all speed grades;
//! the reference clock and output limits depend on the grade.

use crate::error::ProfileError;
use crate::family::{Family, SpeedGrade};
use crate::profile::{ConstraintProfile, PLL_PHASE_TAPS};
use pllplan_common::Frequency;

/// Per-speed-grade limits of the Cyclone II PLL.
struct CycloneIiGrade {
    grade: SpeedGrade,
    /// Reference clock range in Hz.
    clkin: (f64, f64),
    /// Output clock range in Hz.
    clkout: (f64, f64),
}

const GRADES: &[CycloneIiGrade] = &[
    CycloneIiGrade {
        grade: SpeedGrade::new(6),
        clkin: (5e6, 420e6),
        clkout: (0.0, 400e6),
    },
    CycloneIiGrade {
        grade: SpeedGrade::new(7),
        clkin: (5e6, 380e6),
        clkout: (0.0, 340e6),
    },
    CycloneIiGrade {
        grade: SpeedGrade::new(8),
        clkin: (5e6, 340e6),
        clkout: (0.0, 280e6),
    },
];

/// Speed grades with a Cyclone II PLL profile.
pub const SPEED_GRADES: &[SpeedGrade] = &[SpeedGrade::new(6), SpeedGrade::new(7), SpeedGrade::new(8)];

/// Number of `C` output counters.
const OUTPUTS: usize = 3;
/// VCO range in Hz. The vendor lowers the maximum to 500 MHz when the VCO
/// post-scale counter is 2; the PLL is always planned with that counter at 1.
const VCO: (f64, f64) = (300e6, 1000e6);
/// Pre-scale counter `N`.
const N_RANGE: (u32, u32) = (1, 4);
/// Feedback counter `M`.
const M_RANGE: (u32, u32) = (1, 32);
/// Post-scale counters `C0..C2`. Marked provisional in the handbook.
const C_RANGE: (u32, u32) = (1, 512);

/// Builds the Cyclone II PLL profile for the given speed grade.
///
/// # Errors
///
/// Returns [`ProfileError::UnknownSpeedGrade`] for grades other than -6, -7, -8.
pub fn pll(speed_grade: SpeedGrade) -> Result<ConstraintProfile, ProfileError> {
    let limits = GRADES
        .iter()
        .find(|g| g.grade == speed_grade)
        .ok_or_else(|| Family::CycloneIi.unknown_grade(speed_grade))?;

    ConstraintProfile::builder(format!("{} {speed_grade}", Family::CycloneIi.name()))
        .registry_key(Family::CycloneIi, speed_grade)
        .input_range(Frequency::new(limits.clkin.0), Frequency::new(limits.clkin.1))
        .vco_range(Frequency::new(VCO.0), Frequency::new(VCO.1))
        .output_range(Frequency::new(limits.clkout.0), Frequency::new(limits.clkout.1))
        .input_divider(N_RANGE.0, N_RANGE.1)
        .feedback_multiplier(M_RANGE.0, M_RANGE.1)
        .output_divider(C_RANGE.0, C_RANGE.1)
        .max_outputs(OUTPUTS)
        .phase_taps(Some(PLL_PHASE_TAPS))
        .build()
}
