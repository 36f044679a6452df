//! Error types for configuration loading and validation.

use pllplan_profile::ProfileError;

/// Errors that can occur when loading or validating a `pllplan.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A PLL block names a profile that is not defined under `[profiles]`.
    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    /// A profile could not be looked up or built.
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
}
