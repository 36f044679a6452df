//! Intel (formerly Altera) clocking primitive profiles.
//!
//! Ranges are taken from the family handbooks; see each module for the
//! per-speed-grade tables.

pub mod cyclone_ii;
