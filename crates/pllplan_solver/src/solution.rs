//! Solved configurations, ready to be turned into primitive parameters.

use pllplan_common::{ContentHash, Fingerprinter, Frequency};
use serde::Serialize;
use std::fmt::Write;

/// The solved parameters of one output tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputConfig {
    /// Output tap index.
    pub index: usize,
    /// Output divider `C`.
    pub divider: u32,
    /// The frequency that was requested.
    pub target_freq: Frequency,
    /// The frequency actually produced, `vco / C`.
    pub actual_freq: Frequency,
    /// `|actual - target| / target`.
    pub relative_error: f64,
    /// Phase shift in degrees, as requested.
    pub phase_degrees: f64,
    /// Duty cycle, as requested.
    pub duty_cycle: f64,
}

/// A complete, legal assignment of every counter in a clocking primitive.
///
/// Only the solver constructs these, so every instance satisfies the profile
/// it was solved against: the VCO and every output lie in their legal ranges,
/// every counter lies in its legal range, and the worst output error is
/// within the profile's acceptance threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolvedConfiguration {
    profile_name: String,
    input_freq: Frequency,
    input_divider: u32,
    feedback_multiplier: u32,
    vco_freq: Frequency,
    outputs: Vec<OutputConfig>,
    worst_error: f64,
}

impl SolvedConfiguration {
    pub(crate) fn new(
        profile_name: &str,
        input_freq: Frequency,
        input_divider: u32,
        feedback_multiplier: u32,
        vco_freq: Frequency,
        mut outputs: Vec<OutputConfig>,
    ) -> Self {
        outputs.sort_by_key(|o| o.index);
        let worst_error = outputs
            .iter()
            .map(|o| o.relative_error)
            .fold(0.0, f64::max);
        Self {
            profile_name: profile_name.to_string(),
            input_freq,
            input_divider,
            feedback_multiplier,
            vco_freq,
            outputs,
            worst_error,
        }
    }

    /// Name of the profile this configuration was solved against.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// The reference clock.
    pub fn input_freq(&self) -> Frequency {
        self.input_freq
    }

    /// Input divider `N`.
    pub fn input_divider(&self) -> u32 {
        self.input_divider
    }

    /// Feedback multiplier `M`.
    pub fn feedback_multiplier(&self) -> u32 {
        self.feedback_multiplier
    }

    /// VCO frequency, `input * M / N`.
    pub fn vco_freq(&self) -> Frequency {
        self.vco_freq
    }

    /// Solved outputs, ordered by tap index.
    pub fn outputs(&self) -> &[OutputConfig] {
        &self.outputs
    }

    /// Looks up the solved output on tap `index`.
    pub fn output(&self, index: usize) -> Option<&OutputConfig> {
        self.outputs.iter().find(|o| o.index == index)
    }

    /// Largest relative error over all outputs.
    pub fn worst_error(&self) -> f64 {
        self.worst_error
    }

    /// Returns `true` if every output is produced exactly.
    pub fn is_exact(&self) -> bool {
        self.worst_error == 0.0
    }

    /// Human-readable multi-line description of the configuration.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{}: {} / {} * {} = VCO {}\n",
            self.profile_name,
            self.input_freq,
            self.input_divider,
            self.feedback_multiplier,
            self.vco_freq
        );
        for out in &self.outputs {
            // Writing into a String cannot fail.
            let _ = writeln!(
                s,
                "  out{}: /{} -> {} (target {}, error {:.4}%, phase {}°, duty {}%)",
                out.index,
                out.divider,
                out.actual_freq,
                out.target_freq,
                out.relative_error * 100.0,
                out.phase_degrees,
                out.duty_cycle * 100.0
            );
        }
        s
    }

    /// Content hash of the solved parameters.
    ///
    /// Two configurations with the same fingerprint program the hardware
    /// identically; the profile name does not participate.
    pub fn fingerprint(&self) -> ContentHash {
        let mut fp = Fingerprinter::new();
        fp.write_f64(self.input_freq.hz())
            .write_u32(self.input_divider)
            .write_u32(self.feedback_multiplier)
            .write_f64(self.vco_freq.hz());
        for out in &self.outputs {
            fp.write_u64(out.index as u64)
                .write_u32(out.divider)
                .write_f64(out.phase_degrees)
                .write_f64(out.duty_cycle)
                .write_f64(out.actual_freq.hz());
        }
        fp.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(index: usize, divider: u32, target: f64, actual: f64) -> OutputConfig {
        let target_freq = Frequency::new(target);
        let actual_freq = Frequency::new(actual);
        OutputConfig {
            index,
            divider,
            target_freq,
            actual_freq,
            relative_error: actual_freq.relative_error(target_freq),
            phase_degrees: 0.0,
            duty_cycle: 0.5,
        }
    }

    fn sample() -> SolvedConfiguration {
        SolvedConfiguration::new(
            "Test PLL",
            Frequency::from_mhz(50.0),
            1,
            6,
            Frequency::from_mhz(300.0),
            vec![output(2, 12, 25e6, 25e6), output(0, 3, 100e6, 100e6)],
        )
    }

    #[test]
    fn outputs_sorted_by_index() {
        let c = sample();
        let indices: Vec<usize> = c.outputs().iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(c.output(2).unwrap().divider, 12);
        assert!(c.output(1).is_none());
    }

    #[test]
    fn worst_error_is_max() {
        let c = SolvedConfiguration::new(
            "Test PLL",
            Frequency::from_mhz(50.0),
            1,
            19,
            Frequency::from_mhz(950.0),
            vec![output(0, 19, 50e6, 50e6), output(1, 29, 33e6, 950e6 / 29.0)],
        );
        assert!((c.worst_error() - 0.007314524555903831).abs() < 1e-15);
        assert!(!c.is_exact());
        assert!(sample().is_exact());
    }

    #[test]
    fn summary_lists_every_output() {
        let text = sample().summary();
        assert!(text.starts_with("Test PLL: 50MHz / 1 * 6 = VCO 300MHz\n"));
        assert!(text.contains("out0: /3 -> 100MHz"));
        assert!(text.contains("out2: /12 -> 25MHz"));
    }

    #[test]
    fn fingerprint_ignores_profile_name() {
        let a = sample();
        let mut b = sample();
        b.profile_name = "Other".to_string();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_tracks_dividers() {
        let a = sample();
        let mut b = sample();
        b.outputs[0].divider = 4;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["feedback_multiplier"], 6);
        assert_eq!(json["vco_freq"], 300e6);
        assert_eq!(json["outputs"][1]["index"], 2);
    }
}
