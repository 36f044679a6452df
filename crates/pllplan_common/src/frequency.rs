//! Frequency values with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A frequency value stored in Hertz.
///
/// Supports parsing from strings like "50MHz", "100KHz", "1GHz", "48000Hz",
/// and bare numeric values (interpreted as Hz). Displays using the most
/// appropriate unit for readability.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// A frequency of zero Hertz.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new frequency from a value in Hertz.
    pub const fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Creates a new frequency from a value in megahertz.
    pub fn from_mhz(mhz: f64) -> Self {
        Self(mhz * 1_000_000.0)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in megahertz.
    pub fn mhz(&self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Returns `true` if the value is finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns `|self - target| / target`.
    ///
    /// The target must be non-zero; callers validate this before searching.
    pub fn relative_error(&self, target: Frequency) -> f64 {
        (self.0 - target.0).abs() / target.0
    }

    /// Scales the frequency by `mul / div`.
    pub fn scale(&self, mul: u32, div: u32) -> Frequency {
        Frequency(self.0 * f64::from(mul) / f64::from(div))
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000_000.0 {
            write!(f, "{}GHz", hz / 1_000_000_000.0)
        } else if hz >= 1_000_000.0 {
            write!(f, "{}MHz", hz / 1_000_000.0)
        } else if hz >= 1_000.0 {
            write!(f, "{}KHz", hz / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error returned when a frequency string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

/// Unit suffixes and their multipliers, longest suffix first so "mhz" wins over "hz".
const UNITS: &[(&str, f64)] = &[
    ("ghz", 1_000_000_000.0),
    ("mhz", 1_000_000.0),
    ("khz", 1_000.0),
    ("hz", 1.0),
];

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (num, scale) = UNITS
            .iter()
            .find_map(|(suffix, scale)| lower.strip_suffix(suffix).map(|n| (n, *scale)))
            .unwrap_or((lower.as_str(), 1.0));

        let val: f64 = num.trim().parse().map_err(|_| err())?;
        if !val.is_finite() {
            return Err(err());
        }
        Ok(Frequency(val * scale))
    }
}
