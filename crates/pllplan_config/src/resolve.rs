//! Block resolution: turning configuration entries into planning jobs.

use crate::error::ConfigError;
use crate::types::{PlanConfig, PllBlock, ProfileDef};
use pllplan_common::Frequency;
use pllplan_profile::{load_profile, ConstraintProfile};
use pllplan_solver::{ClockRequest, OutputSpec, PlanJob};

/// Parses a frequency string, naming the offending field on failure.
pub(crate) fn parse_frequency(field: &str, value: &str) -> Result<Frequency, ConfigError> {
    value
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("{field}: {e}")))
}

fn parse_range(field: &str, [min, max]: &[String; 2]) -> Result<(Frequency, Frequency), ConfigError> {
    Ok((parse_frequency(field, min)?, parse_frequency(field, max)?))
}

/// Builds the profile described by a `[profiles.<name>]` entry.
pub fn resolve_profile(name: &str, def: &ProfileDef) -> Result<ConstraintProfile, ConfigError> {
    let field = |key: &str| format!("profiles.{name}.{key}");
    let (in_min, in_max) = parse_range(&field("input_range"), &def.input_range)?;
    let (vco_min, vco_max) = parse_range(&field("vco_range"), &def.vco_range)?;

    let mut builder = ConstraintProfile::builder(name)
        .input_range(in_min, in_max)
        .vco_range(vco_min, vco_max)
        .input_divider(def.input_divider[0], def.input_divider[1])
        .feedback_multiplier(def.feedback_multiplier[0], def.feedback_multiplier[1])
        .output_divider(def.output_divider[0], def.output_divider[1])
        .max_outputs(def.max_outputs)
        .phase_taps(def.phase_taps);
    if let Some(range) = &def.output_range {
        let (min, max) = parse_range(&field("output_range"), range)?;
        builder = builder.output_range(min, max);
    }
    if let Some(threshold) = def.acceptance_threshold {
        builder = builder.acceptance_threshold(threshold);
    }
    Ok(builder.build()?)
}

fn block_profile(
    config: &PlanConfig,
    name: &str,
    block: &PllBlock,
) -> Result<ConstraintProfile, ConfigError> {
    match &block.profile {
        Some(profile) => {
            let def = config
                .profiles
                .get(profile)
                .ok_or_else(|| ConfigError::UnknownProfile(profile.clone()))?;
            resolve_profile(profile, def)
        }
        None => {
            let target = config
                .target
                .as_ref()
                .ok_or_else(|| ConfigError::MissingField(format!("target (needed by plls.{name})")))?;
            Ok(load_profile(&target.family, &target.speed_grade)?)
        }
    }
}

fn block_request(name: &str, block: &PllBlock) -> Result<ClockRequest, ConfigError> {
    let input = parse_frequency(&format!("plls.{name}.input"), &block.input)?;
    block
        .outputs
        .iter()
        .enumerate()
        .try_fold(ClockRequest::new(input), |request, (position, out)| {
            let index = out.index.unwrap_or(position);
            let freq = parse_frequency(&format!("plls.{name}.outputs[{position}].freq"), &out.freq)?;
            Ok(request.with_output(
                OutputSpec::new(index, freq)
                    .with_phase(out.phase)
                    .with_duty_cycle(out.duty),
            ))
        })
}

/// Resolves every PLL block into a planning job, in block-name order.
///
/// Blocks that name a profile use the matching `[profiles.*]` entry; all
/// others use the built-in profile selected by `[target]`. Request-level
/// problems such as a duplicate output index are left for the solver to
/// report per block.
pub fn resolve_blocks(config: &PlanConfig) -> Result<Vec<PlanJob>, ConfigError> {
    config
        .plls
        .iter()
        .map(|(name, block)| {
            let profile = block_profile(config, name, block)?;
            let request = block_request(name, block)?;
            Ok(PlanJob::new(name.clone(), profile, request))
        })
        .collect()
}
