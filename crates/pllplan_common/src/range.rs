//! Inclusive frequency and divider ranges.

use crate::frequency::Frequency;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Errors raised when constructing a range from malformed bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RangeError {
    /// The lower bound is greater than the upper bound.
    #[error("inverted range: {min} > {max}")]
    Inverted {
        /// The lower bound, formatted.
        min: String,
        /// The upper bound, formatted.
        max: String,
    },
    /// A frequency bound is negative, NaN or infinite.
    #[error("frequency bound {0} is not a finite non-negative value")]
    BadBound(String),
    /// A divider range starts at zero.
    #[error("divider range must start at 1 or above")]
    ZeroDivider,
}

/// An inclusive range of legal frequencies.
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRange {
    min: Frequency,
    max: Frequency,
}

impl FrequencyRange {
    /// Creates a range, rejecting inverted or non-finite bounds.
    pub fn new(min: Frequency, max: Frequency) -> Result<Self, RangeError> {
        for bound in [min, max] {
            if !bound.hz().is_finite() || bound.hz() < 0.0 {
                return Err(RangeError::BadBound(bound.hz().to_string()));
            }
        }
        if min > max {
            return Err(RangeError::Inverted {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// Creates a range from bounds in Hertz.
    pub fn from_hz(min: f64, max: f64) -> Result<Self, RangeError> {
        Self::new(Frequency::new(min), Frequency::new(max))
    }

    /// The lower bound.
    pub fn min(&self) -> Frequency {
        self.min
    }

    /// The upper bound.
    pub fn max(&self) -> Frequency {
        self.max
    }

    /// Returns `true` if `freq` lies within the range, bounds included.
    pub fn contains(&self, freq: Frequency) -> bool {
        freq >= self.min && freq <= self.max
    }
}

impl fmt::Debug for FrequencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrequencyRange({self})")
    }
}

impl fmt::Display for FrequencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// An inclusive range of integer counter values (dividers or multipliers).
///
/// Counters divide by their value, so zero is never a legal lower bound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DividerRange {
    min: u32,
    max: u32,
}

impl DividerRange {
    /// Creates a range, rejecting zero lower bounds and inverted bounds.
    pub fn new(min: u32, max: u32) -> Result<Self, RangeError> {
        if min == 0 {
            return Err(RangeError::ZeroDivider);
        }
        if min > max {
            return Err(RangeError::Inverted {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// The smallest legal value.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// The largest legal value.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of values in the range.
    pub fn len(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    /// Always `false`; construction rejects empty ranges.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `value` lies within the range.
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Iterates the range in ascending order.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl fmt::Debug for DividerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DividerRange({self})")
    }
}

impl fmt::Display for DividerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
