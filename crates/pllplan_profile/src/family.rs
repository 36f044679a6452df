//! Primitive families and speed grades, the keys of the profile registry.

use crate::error::ProfileError;
use crate::profile::ConstraintProfile;
use crate::{intel, xilinx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FPGA vendors with supported clocking primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    /// Intel (formerly Altera).
    Intel,
    /// Xilinx (AMD).
    Xilinx,
}

/// A clock-generation primitive family.
///
/// Each family has one [`ConstraintProfile`] per supported speed grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Cyclone II PLL with three `C` output counters.
    CycloneIi,
    /// Spartan-3 class PLL with six output counters.
    Spartan3Pll,
    /// Spartan-3 class `DCM_CLKGEN` digital clock manager, one synthesized output.
    Spartan3Dcm,
}

impl Family {
    /// Every registered family, in registry order.
    pub const ALL: [Family; 3] = [Family::CycloneIi, Family::Spartan3Pll, Family::Spartan3Dcm];

    /// Returns the canonical registry key (e.g. `"cyclone_ii"`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::CycloneIi => "cyclone_ii",
            Self::Spartan3Pll => "spartan3_pll",
            Self::Spartan3Dcm => "spartan3_dcm",
        }
    }

    /// Returns the human-readable name of this family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CycloneIi => "Cyclone II PLL",
            Self::Spartan3Pll => "Spartan-3 PLL",
            Self::Spartan3Dcm => "Spartan-3 DCM",
        }
    }

    /// Returns the vendor of this family.
    pub fn vendor(&self) -> Vendor {
        match self {
            Self::CycloneIi => Vendor::Intel,
            Self::Spartan3Pll | Self::Spartan3Dcm => Vendor::Xilinx,
        }
    }

    /// Returns the speed grades this family has profiles for.
    pub fn speed_grades(&self) -> &'static [SpeedGrade] {
        match self {
            Self::CycloneIi => intel::cyclone_ii::SPEED_GRADES,
            Self::Spartan3Pll | Self::Spartan3Dcm => xilinx::spartan3::SPEED_GRADES,
        }
    }

    /// Builds the constraint profile for one speed grade of this family.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnknownSpeedGrade`] if the family has no such grade.
    pub fn profile(&self, speed_grade: SpeedGrade) -> Result<ConstraintProfile, ProfileError> {
        match self {
            Self::CycloneIi => intel::cyclone_ii::pll(speed_grade),
            Self::Spartan3Pll => xilinx::spartan3::pll(speed_grade),
            Self::Spartan3Dcm => xilinx::spartan3::dcm(speed_grade),
        }
    }

    pub(crate) fn unknown_grade(&self, speed_grade: SpeedGrade) -> ProfileError {
        let supported: Vec<String> = self.speed_grades().iter().map(|g| g.to_string()).collect();
        ProfileError::UnknownSpeedGrade {
            family: self.name(),
            speed_grade,
            supported: supported.join(", "),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Family {
    type Err = ProfileError;

    /// Parses a family name, accepting common spellings case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cyclone_ii" | "cycloneii" | "cyclone-ii" | "cyclone2" | "cyclone_2" => {
                Ok(Self::CycloneIi)
            }
            "spartan3_pll" | "spartan3pll" | "spartan-3-pll" | "s3pll" | "s3_pll" => {
                Ok(Self::Spartan3Pll)
            }
            "spartan3_dcm" | "spartan3dcm" | "spartan-3-dcm" | "s3dcm" | "s3_dcm" => {
                Ok(Self::Spartan3Dcm)
            }
            _ => Err(ProfileError::UnknownFamily(s.to_string())),
        }
    }
}

/// A vendor speed grade, stored as its magnitude.
///
/// Displayed in the vendor's dashed form (`-6`). Parsing accepts `-6`, `6`,
/// and Intel temperature-prefixed forms such as `C6` or `I7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeedGrade(u8);

impl SpeedGrade {
    /// Creates a speed grade from its magnitude.
    pub const fn new(grade: u8) -> Self {
        Self(grade)
    }

    /// Returns the magnitude of the speed grade.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SpeedGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.0)
    }
}

impl FromStr for SpeedGrade {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('-')
            .or_else(|| {
                trimmed
                    .strip_prefix(|c: char| matches!(c.to_ascii_uppercase(), 'C' | 'I' | 'A'))
            })
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .map(SpeedGrade)
            .map_err(|_| ProfileError::InvalidSpeedGrade(s.to_string()))
    }
}
