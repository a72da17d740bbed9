//! Configuration loading from constcond.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for constcond.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConstcondConfig {
    /// File path patterns whose findings are suppressed.
    pub ignore: Option<Vec<String>>,
    /// Directory names excluded from scanning.
    pub exclude: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from constcond.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<ConstcondConfig>> {
    let path = root.join("constcond.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cfg = toml::from_str(&content).context("Invalid constcond.toml")?;
    Ok(Some(cfg))
}
