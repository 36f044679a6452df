//! The caller's description of the clocks a primitive should produce.

use std::collections::BTreeSet;

use crate::error::PlanningError;
use pllplan_common::Frequency;
use serde::{Deserialize, Serialize};

/// Duty cycle used when an output does not ask for one.
pub const DEFAULT_DUTY_CYCLE: f64 = 0.5;

/// One requested output clock.
///
/// `index` names a hardware-fixed output tap (`CLKOUT2`, `C1`, ...), so it is
/// stable and never reordered by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Output tap index, 0-based.
    pub index: usize,
    /// Desired output frequency.
    pub target_freq: Frequency,
    /// Phase shift in degrees, in `[0, 360)`.
    pub phase_degrees: f64,
    /// Duty cycle as a fraction, in `(0, 1)`.
    pub duty_cycle: f64,
}

impl OutputSpec {
    /// Requests `target_freq` on tap `index` with no phase shift and a 50% duty cycle.
    pub fn new(index: usize, target_freq: Frequency) -> Self {
        Self {
            index,
            target_freq,
            phase_degrees: 0.0,
            duty_cycle: DEFAULT_DUTY_CYCLE,
        }
    }

    /// Sets the phase shift in degrees.
    pub fn with_phase(mut self, phase_degrees: f64) -> Self {
        self.phase_degrees = phase_degrees;
        self
    }

    /// Sets the duty cycle.
    pub fn with_duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }
}

/// A clocking block's request: one reference clock and the outputs to derive from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The supplied reference clock.
    pub input_freq: Frequency,
    /// Requested outputs, in the caller's order.
    pub outputs: Vec<OutputSpec>,
}

impl ClockRequest {
    /// Creates a request with no outputs yet.
    pub fn new(input_freq: Frequency) -> Self {
        Self {
            input_freq,
            outputs: Vec::new(),
        }
    }

    /// Appends an output.
    pub fn with_output(mut self, output: OutputSpec) -> Self {
        self.outputs.push(output);
        self
    }

    /// Checks the per-output invariants against a primitive with `max_outputs` taps.
    ///
    /// The output count itself is checked separately so that it can be
    /// reported as [`PlanningError::TooManyOutputs`].
    pub(crate) fn validate(&self, max_outputs: usize) -> Result<(), PlanningError> {
        let invalid = |msg: String| Err(PlanningError::InvalidRequest(msg));

        if self.outputs.is_empty() {
            return invalid("no outputs requested".to_string());
        }

        let mut seen = BTreeSet::new();
        for out in &self.outputs {
            let i = out.index;
            if i >= max_outputs {
                return invalid(format!(
                    "output {i} does not exist (the primitive has {max_outputs} outputs)"
                ));
            }
            if !seen.insert(i) {
                return invalid(format!("output {i} requested more than once"));
            }
            if !out.target_freq.is_positive() {
                return invalid(format!(
                    "output {i}: target frequency {} must be positive",
                    out.target_freq
                ));
            }
            if !(out.phase_degrees.is_finite() && (0.0..360.0).contains(&out.phase_degrees)) {
                return invalid(format!(
                    "output {i}: phase {}° must be in [0, 360)",
                    out.phase_degrees
                ));
            }
            if !(out.duty_cycle > 0.0 && out.duty_cycle < 1.0) {
                return invalid(format!(
                    "output {i}: duty cycle {} must be strictly between 0 and 1",
                    out.duty_cycle
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mhz(v: f64) -> Frequency {
        Frequency::from_mhz(v)
    }

    fn expect_invalid(request: &ClockRequest, max_outputs: usize, needle: &str) {
        match request.validate(max_outputs) {
            Err(PlanningError::InvalidRequest(msg)) => {
                assert!(msg.contains(needle), "message {msg:?} lacks {needle:?}")
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn output_defaults() {
        let out = OutputSpec::new(2, mhz(25.0));
        assert_eq!(out.index, 2);
        assert_eq!(out.phase_degrees, 0.0);
        assert_eq!(out.duty_cycle, DEFAULT_DUTY_CYCLE);
    }

    #[test]
    fn valid_request() {
        let req = ClockRequest::new(mhz(50.0))
            .with_output(OutputSpec::new(0, mhz(100.0)))
            .with_output(OutputSpec::new(2, mhz(25.0)).with_phase(90.0).with_duty_cycle(0.25));
        assert!(req.validate(3).is_ok());
    }

    #[test]
    fn empty_request_rejected() {
        expect_invalid(&ClockRequest::new(mhz(50.0)), 3, "no outputs");
    }

    #[test]
    fn duplicate_index_rejected() {
        let req = ClockRequest::new(mhz(50.0))
            .with_output(OutputSpec::new(1, mhz(100.0)))
            .with_output(OutputSpec::new(1, mhz(25.0)));
        expect_invalid(&req, 3, "more than once");
    }

    #[test]
    fn index_past_last_tap_rejected() {
        let req = ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(3, mhz(100.0)));
        expect_invalid(&req, 3, "does not exist");
    }

    #[test]
    fn huge_tap_count_is_not_preallocated() {
        let req = ClockRequest::new(mhz(50.0))
            .with_output(OutputSpec::new(0, mhz(100.0)))
            .with_output(OutputSpec::new(usize::MAX - 1, mhz(25.0)));
        assert!(req.validate(usize::MAX).is_ok());

        let dup = req.clone().with_output(OutputSpec::new(usize::MAX - 1, mhz(10.0)));
        expect_invalid(&dup, usize::MAX, "more than once");
    }

    #[test]
    fn bad_target_rejected() {
        let req = ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(0, Frequency::ZERO));
        expect_invalid(&req, 3, "must be positive");
    }

    #[test]
    fn phase_bounds() {
        let at = |phase| {
            ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(0, mhz(100.0)).with_phase(phase))
        };
        assert!(at(0.0).validate(1).is_ok());
        assert!(at(359.5).validate(1).is_ok());
        expect_invalid(&at(360.0), 1, "phase");
        expect_invalid(&at(-45.0), 1, "phase");
        expect_invalid(&at(f64::NAN), 1, "phase");
    }

    #[test]
    fn duty_cycle_bounds() {
        let at = |duty| {
            ClockRequest::new(mhz(50.0))
                .with_output(OutputSpec::new(0, mhz(100.0)).with_duty_cycle(duty))
        };
        assert!(at(0.3).validate(1).is_ok());
        expect_invalid(&at(0.0), 1, "duty cycle");
        expect_invalid(&at(1.0), 1, "duty cycle");
        expect_invalid(&at(f64::NAN), 1, "duty cycle");
    }

    #[test]
    fn serde_roundtrip() {
        let req = ClockRequest::new(mhz(50.0)).with_output(OutputSpec::new(0, mhz(100.0)));
        let json = serde_json::to_string(&req).unwrap();
        let back: ClockRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
