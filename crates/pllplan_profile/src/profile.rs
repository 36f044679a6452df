//! The immutable constraint profile of one primitive family and speed grade.

use crate::error::ProfileError;
use crate::family::{Family, SpeedGrade};
use pllplan_common::{DividerRange, Frequency, FrequencyRange};
use serde::Serialize;

/// Worst-case relative frequency error accepted by every built-in profile (1%).
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.01;

/// Number of VCO phase taps on the PLL output counters of the built-in families.
pub const PLL_PHASE_TAPS: u32 = 8;

/// The legal numeric ranges of one clocking primitive.
///
/// Profiles are only created through [`ProfileBuilder::build`], which rejects
/// malformed ranges, so every profile a solver sees is internally consistent.
/// There is no mutation API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintProfile {
    name: String,
    family: Option<Family>,
    speed_grade: Option<SpeedGrade>,
    input_freq_range: FrequencyRange,
    vco_freq_range: FrequencyRange,
    output_freq_range: Option<FrequencyRange>,
    input_divider_range: DividerRange,
    feedback_multiplier_range: DividerRange,
    output_divider_range: DividerRange,
    max_outputs: usize,
    phase_taps: Option<u32>,
    acceptance_threshold: f64,
}

impl ConstraintProfile {
    /// Starts building a profile with the given display name.
    pub fn builder(name: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(name)
    }

    /// Display name, e.g. `"Cyclone II PLL -6"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registry family, or `None` for user-defined profiles.
    pub fn family(&self) -> Option<Family> {
        self.family
    }

    /// The registry speed grade, or `None` for user-defined profiles.
    pub fn speed_grade(&self) -> Option<SpeedGrade> {
        self.speed_grade
    }

    /// Legal reference clock frequencies.
    pub fn input_freq_range(&self) -> FrequencyRange {
        self.input_freq_range
    }

    /// Legal VCO frequencies.
    pub fn vco_freq_range(&self) -> FrequencyRange {
        self.vco_freq_range
    }

    /// Legal output frequencies, or `None` if the family leaves them unbounded.
    pub fn output_freq_range(&self) -> Option<FrequencyRange> {
        self.output_freq_range
    }

    /// Legal input (pre-VCO) divider values.
    pub fn input_divider_range(&self) -> DividerRange {
        self.input_divider_range
    }

    /// Legal feedback multiplier values.
    pub fn feedback_multiplier_range(&self) -> DividerRange {
        self.feedback_multiplier_range
    }

    /// Legal output (post-VCO) divider values.
    pub fn output_divider_range(&self) -> DividerRange {
        self.output_divider_range
    }

    /// Number of output taps on the primitive.
    pub fn max_outputs(&self) -> usize {
        self.max_outputs
    }

    /// Phase steps per VCO period, or `None` if outputs have no phase control.
    pub fn phase_taps(&self) -> Option<u32> {
        self.phase_taps
    }

    /// Largest worst-case relative frequency error a solution may have.
    pub fn acceptance_threshold(&self) -> f64 {
        self.acceptance_threshold
    }

    /// Returns `true` if `freq` is a legal output frequency.
    pub fn output_allowed(&self, freq: Frequency) -> bool {
        self.output_freq_range
            .map_or(true, |range| range.contains(freq))
    }

    /// Phase resolution in degrees of an output using the given divider.
    ///
    /// One output period spans `phase_taps * divider` VCO phase steps. Returns
    /// `None` when the primitive has no phase control.
    pub fn phase_step(&self, output_divider: u32) -> Option<f64> {
        self.phase_taps
            .map(|taps| 360.0 / (f64::from(taps) * f64::from(output_divider)))
    }
}

/// Builder for [`ConstraintProfile`]; all validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    name: String,
    key: Option<(Family, SpeedGrade)>,
    input: Option<(Frequency, Frequency)>,
    vco: Option<(Frequency, Frequency)>,
    output: Option<(Frequency, Frequency)>,
    input_divider: Option<(u32, u32)>,
    feedback_multiplier: Option<(u32, u32)>,
    output_divider: Option<(u32, u32)>,
    max_outputs: Option<usize>,
    phase_taps: Option<u32>,
    acceptance_threshold: f64,
}

impl ProfileBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            input: None,
            vco: None,
            output: None,
            input_divider: None,
            feedback_multiplier: None,
            output_divider: None,
            max_outputs: None,
            phase_taps: None,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }

    pub(crate) fn registry_key(mut self, family: Family, speed_grade: SpeedGrade) -> Self {
        self.key = Some((family, speed_grade));
        self
    }

    /// Sets the legal reference clock range.
    pub fn input_range(mut self, min: Frequency, max: Frequency) -> Self {
        self.input = Some((min, max));
        self
    }

    /// Sets the legal VCO range.
    pub fn vco_range(mut self, min: Frequency, max: Frequency) -> Self {
        self.vco = Some((min, max));
        self
    }

    /// Bounds the output frequency. Without this call outputs are unbounded.
    pub fn output_range(mut self, min: Frequency, max: Frequency) -> Self {
        self.output = Some((min, max));
        self
    }

    /// Sets the inclusive input divider range.
    pub fn input_divider(mut self, min: u32, max: u32) -> Self {
        self.input_divider = Some((min, max));
        self
    }

    /// Sets the inclusive feedback multiplier range.
    pub fn feedback_multiplier(mut self, min: u32, max: u32) -> Self {
        self.feedback_multiplier = Some((min, max));
        self
    }

    /// Sets the inclusive output divider range.
    pub fn output_divider(mut self, min: u32, max: u32) -> Self {
        self.output_divider = Some((min, max));
        self
    }

    /// Sets the number of output taps.
    pub fn max_outputs(mut self, count: usize) -> Self {
        self.max_outputs = Some(count);
        self
    }

    /// Sets the number of phase taps per VCO period (`None` for no phase control).
    pub fn phase_taps(mut self, taps: Option<u32>) -> Self {
        self.phase_taps = taps;
        self
    }

    /// Overrides the acceptance threshold (defaults to [`DEFAULT_ACCEPTANCE_THRESHOLD`]).
    pub fn acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Validates the collected ranges and produces the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] if a required range is
    /// missing, any range is empty or inverted, a frequency bound is negative
    /// or non-finite, a divider range includes zero, there are no outputs,
    /// the phase tap count is zero, or the threshold is not a positive number.
    pub fn build(self) -> Result<ConstraintProfile, ProfileError> {
        let name = self.name.as_str();
        let invalid = |what: &str, detail: String| invalid_field(name, what, detail);

        let input_freq_range = checked_freq_range(name, "input range", self.input)?;
        let vco_freq_range = checked_freq_range(name, "vco range", self.vco)?;
        let output_freq_range = self
            .output
            .map(|bounds| checked_freq_range(name, "output range", Some(bounds)))
            .transpose()?;
        let input_divider_range = checked_divider_range(name, "input divider", self.input_divider)?;
        let feedback_multiplier_range =
            checked_divider_range(name, "feedback multiplier", self.feedback_multiplier)?;
        let output_divider_range =
            checked_divider_range(name, "output divider", self.output_divider)?;

        let max_outputs = match self.max_outputs {
            None => return Err(invalid("max outputs", "missing".to_string())),
            Some(0) => return Err(invalid("max outputs", "must be at least 1".to_string())),
            Some(n) => n,
        };
        if self.phase_taps == Some(0) {
            return Err(invalid("phase taps", "must be at least 1".to_string()));
        }
        if !(self.acceptance_threshold.is_finite() && self.acceptance_threshold > 0.0) {
            return Err(invalid(
                "acceptance threshold",
                format!("{} is not a positive number", self.acceptance_threshold),
            ));
        }

        Ok(ConstraintProfile {
            name: self.name.clone(),
            family: self.key.map(|(family, _)| family),
            speed_grade: self.key.map(|(_, grade)| grade),
            input_freq_range,
            vco_freq_range,
            output_freq_range,
            input_divider_range,
            feedback_multiplier_range,
            output_divider_range,
            max_outputs,
            phase_taps: self.phase_taps,
            acceptance_threshold: self.acceptance_threshold,
        })
    }
}

fn invalid_field(profile: &str, what: &str, detail: String) -> ProfileError {
    ProfileError::InvalidProfile(format!("{profile}: {what}: {detail}"))
}

fn checked_freq_range(
    profile: &str,
    what: &str,
    bounds: Option<(Frequency, Frequency)>,
) -> Result<FrequencyRange, ProfileError> {
    let (min, max) = bounds.ok_or_else(|| invalid_field(profile, what, "missing".to_string()))?;
    FrequencyRange::new(min, max).map_err(|e| invalid_field(profile, what, e.to_string()))
}

fn checked_divider_range(
    profile: &str,
    what: &str,
    bounds: Option<(u32, u32)>,
) -> Result<DividerRange, ProfileError> {
    let (min, max) = bounds.ok_or_else(|| invalid_field(profile, what, "missing".to_string()))?;
    DividerRange::new(min, max).map_err(|e| invalid_field(profile, what, e.to_string()))
}
