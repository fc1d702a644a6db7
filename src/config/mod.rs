//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "murmur.yaml";

/// Example configuration written by `murmur init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../murmur.example.yaml");

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: GenerationConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
