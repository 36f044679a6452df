//! Parsing and validation of `pllplan.toml` clock-planning files.
//!
//! This crate reads the planning file and produces a strongly-typed
//! [`PlanConfig`]: the default target primitive, named PLL blocks with their
//! requested outputs, and optional user-defined constraint profiles.
//! [`resolve_blocks`] turns a validated configuration into planning jobs.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use resolve::{resolve_blocks, resolve_profile};
pub use types::*;
