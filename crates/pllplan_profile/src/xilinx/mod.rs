//! Xilinx (AMD) clocking primitive profiles.
//!
//! Covers the Spartan-3 class PLL and the `DCM_CLKGEN` digital clock manager.

pub mod spartan3;
