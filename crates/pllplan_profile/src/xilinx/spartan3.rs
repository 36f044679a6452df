//! Spartan-3 class PLL and DCM constraint profiles.
//!
//! The PLL feeds six `CLKOUT` dividers from one VCO (`DIVCLK_DIVIDE` before
//! the phase detector, `CLKFBOUT_MULT` in the feedback loop), with phase
//! selectable in eighths of a VCO period.
//!
//! The `DCM_CLKGEN` synthesizes a single `CLKFX = CLKIN * M / D` output. It
//! has no input divider (the whole divide goes to `CLKFX_DIVIDE`), no
//! meaningful VCO limit, and no output phase control.

use crate::error::ProfileError;
use crate::family::{Family, SpeedGrade};
use crate::profile::{ConstraintProfile, PLL_PHASE_TAPS};
use pllplan_common::Frequency;

/// Speed grades with Spartan-3 PLL and DCM profiles.
pub const SPEED_GRADES: &[SpeedGrade] = &[SpeedGrade::new(1), SpeedGrade::new(2), SpeedGrade::new(3)];

/// PLL reference clock range in Hz, common to all grades.
const PLL_CLKIN: (f64, f64) = (19e6, 540e6);
/// PLL VCO range in Hz, per speed grade.
const PLL_VCO: &[(SpeedGrade, (f64, f64))] = &[
    (SpeedGrade::new(1), (400e6, 1000e6)),
    (SpeedGrade::new(2), (400e6, 1000e6)),
    (SpeedGrade::new(3), (400e6, 1080e6)),
];
const PLL_DIVCLK_DIVIDE: (u32, u32) = (1, 52);
// Shared Xilinx clocking limits for CLKFBOUT_MULT and CLKOUTn_DIVIDE.
const PLL_CLKFBOUT_MULT: (u32, u32) = (2, 64);
const PLL_CLKOUT_DIVIDE: (u32, u32) = (1, 128);
const PLL_OUTPUTS: usize = 6;

/// DCM reference clock range in Hz, per speed grade.
const DCM_CLKIN: &[(SpeedGrade, (f64, f64))] = &[
    (SpeedGrade::new(1), (0.5e6, 200e6)),
    (SpeedGrade::new(2), (0.5e6, 333e6)),
    (SpeedGrade::new(3), (0.5e6, 375e6)),
];
/// The DCM has no VCO in the PLL sense; this bound only excludes nonsense.
const DCM_VCO: (f64, f64) = (5e6, 1e16);
const DCM_CLKFX_MULTIPLY: (u32, u32) = (2, 256);
const DCM_CLKFX_DIVIDE: (u32, u32) = (1, 256);

fn lookup(
    table: &[(SpeedGrade, (f64, f64))],
    family: Family,
    speed_grade: SpeedGrade,
) -> Result<(f64, f64), ProfileError> {
    table
        .iter()
        .find(|(grade, _)| *grade == speed_grade)
        .map(|(_, range)| *range)
        .ok_or_else(|| family.unknown_grade(speed_grade))
}

/// Builds the Spartan-3 PLL profile for the given speed grade.
///
/// # Errors
///
/// Returns [`ProfileError::UnknownSpeedGrade`] for grades other than -1, -2, -3.
pub fn pll(speed_grade: SpeedGrade) -> Result<ConstraintProfile, ProfileError> {
    let family = Family::Spartan3Pll;
    let vco = lookup(PLL_VCO, family, speed_grade)?;

    ConstraintProfile::builder(format!("{} {speed_grade}", family.name()))
        .registry_key(family, speed_grade)
        .input_range(Frequency::new(PLL_CLKIN.0), Frequency::new(PLL_CLKIN.1))
        .vco_range(Frequency::new(vco.0), Frequency::new(vco.1))
        .input_divider(PLL_DIVCLK_DIVIDE.0, PLL_DIVCLK_DIVIDE.1)
        .feedback_multiplier(PLL_CLKFBOUT_MULT.0, PLL_CLKFBOUT_MULT.1)
        .output_divider(PLL_CLKOUT_DIVIDE.0, PLL_CLKOUT_DIVIDE.1)
        .max_outputs(PLL_OUTPUTS)
        .phase_taps(Some(PLL_PHASE_TAPS))
        .build()
}

/// Builds the Spartan-3 `DCM_CLKGEN` profile for the given speed grade.
///
/// # Errors
///
/// Returns [`ProfileError::UnknownSpeedGrade`] for grades other than -1, -2, -3.
pub fn dcm(speed_grade: SpeedGrade) -> Result<ConstraintProfile, ProfileError> {
    let family = Family::Spartan3Dcm;
    let clkin = lookup(DCM_CLKIN, family, speed_grade)?;

    ConstraintProfile::builder(format!("{} {speed_grade}", family.name()))
        .registry_key(family, speed_grade)
        .input_range(Frequency::new(clkin.0), Frequency::new(clkin.1))
        .vco_range(Frequency::new(DCM_VCO.0), Frequency::new(DCM_VCO.1))
        .input_divider(1, 1)
        .feedback_multiplier(DCM_CLKFX_MULTIPLY.0, DCM_CLKFX_MULTIPLY.1)
        .output_divider(DCM_CLKFX_DIVIDE.0, DCM_CLKFX_DIVIDE.1)
        .max_outputs(1)
        .phase_taps(None)
        .build()
}
