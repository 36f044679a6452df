//! Shared foundational types used across the pllplan clock planner.
//!
//! This crate provides frequency values with unit parsing, inclusive frequency
//! and divider ranges, and content fingerprints for solved configurations.

#![warn(missing_docs)]

pub mod fingerprint;
pub mod frequency;
pub mod range;

pub use fingerprint::{ContentHash, Fingerprinter};
pub use frequency::{Frequency, ParseFrequencyError};
pub use range::{DividerRange, FrequencyRange, RangeError};
