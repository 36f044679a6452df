//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::resolve::parse_frequency;
use crate::types::PlanConfig;
use std::path::Path;

/// Name of the planning file looked up in a project directory.
pub const CONFIG_FILE: &str = "pllplan.toml";

/// Loads and validates a `pllplan.toml` configuration from a project directory.
///
/// Reads `<project_dir>/pllplan.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<PlanConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `pllplan.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<PlanConfig, ConfigError> {
    let config: PlanConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that every block is complete and its references resolve.
///
/// Profile ranges are checked later, when [`resolve_blocks`](crate::resolve_blocks)
/// builds them.
fn validate_config(config: &PlanConfig) -> Result<(), ConfigError> {
    if config.plls.is_empty() {
        return Err(ConfigError::MissingField("plls".to_string()));
    }
    if let Some(target) = &config.target {
        if target.family.is_empty() {
            return Err(ConfigError::MissingField("target.family".to_string()));
        }
    }

    for (name, block) in &config.plls {
        parse_frequency(&format!("plls.{name}.input"), &block.input)?;
        if block.outputs.is_empty() {
            return Err(ConfigError::MissingField(format!("plls.{name}.outputs")));
        }
        for (position, out) in block.outputs.iter().enumerate() {
            parse_frequency(&format!("plls.{name}.outputs[{position}].freq"), &out.freq)?;
        }
        match &block.profile {
            Some(profile) if !config.profiles.contains_key(profile) => {
                return Err(ConfigError::UnknownProfile(profile.clone()));
            }
            Some(_) => {}
            None if config.target.is_none() => {
                return Err(ConfigError::MissingField(format!(
                    "target (needed by plls.{name})"
                )));
            }
            None => {}
        }
    }
    Ok(())
}
