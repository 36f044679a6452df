//! Configuration types deserialized from `pllplan.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// The top-level planning configuration parsed from `pllplan.toml`.
#[derive(Debug, Deserialize)]
pub struct PlanConfig {
    /// The default primitive for blocks that do not name a profile.
    #[serde(default)]
    pub target: Option<TargetConfig>,
    /// Named clocking blocks to plan.
    #[serde(default)]
    pub plls: BTreeMap<String, PllBlock>,
    /// User-defined constraint profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileDef>,
}

/// The built-in primitive a configuration targets.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Primitive family name (e.g. "cyclone_ii", "spartan3_pll").
    pub family: String,
    /// Speed grade, as a string ("-6", "C7") or an integer (-6).
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub speed_grade: String,
}

/// One clocking block: a reference clock and the outputs derived from it.
#[derive(Debug, Deserialize)]
pub struct PllBlock {
    /// Reference clock frequency (e.g. "50MHz", or a bare number in Hz).
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub input: String,
    /// Name of a `[profiles.*]` entry to use instead of `[target]`.
    #[serde(default)]
    pub profile: Option<String>,
    /// Requested outputs.
    #[serde(default)]
    pub outputs: Vec<OutputDef>,
}

/// A requested output clock of a PLL block.
#[derive(Debug, Deserialize)]
pub struct OutputDef {
    /// Output tap index; defaults to the output's position in the list.
    #[serde(default)]
    pub index: Option<usize>,
    /// Target frequency.
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub freq: String,
    /// Phase shift in degrees.
    #[serde(default)]
    pub phase: f64,
    /// Duty cycle as a fraction.
    #[serde(default = "default_duty")]
    pub duty: f64,
}

fn default_duty() -> f64 {
    pllplan_solver::DEFAULT_DUTY_CYCLE
}

/// A user-defined constraint profile.
///
/// Frequency ranges are `[min, max]` pairs of frequency strings; divider
/// ranges are inclusive `[min, max]` integer pairs.
#[derive(Debug, Deserialize)]
pub struct ProfileDef {
    /// Legal reference clock range.
    pub input_range: [String; 2],
    /// Legal VCO range.
    pub vco_range: [String; 2],
    /// Legal output range; unconstrained when omitted.
    #[serde(default)]
    pub output_range: Option<[String; 2]>,
    /// Input divider `N` range.
    pub input_divider: [u32; 2],
    /// Feedback multiplier `M` range.
    pub feedback_multiplier: [u32; 2],
    /// Output divider `C` range.
    pub output_divider: [u32; 2],
    /// Number of output taps.
    pub max_outputs: usize,
    /// VCO phase taps per output period; omitted means no phase control.
    #[serde(default)]
    pub phase_taps: Option<u32>,
    /// Largest acceptable worst-case relative error.
    #[serde(default)]
    pub acceptance_threshold: Option<f64>,
}

/// Accepts either a TOML string or a number and returns its text.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
