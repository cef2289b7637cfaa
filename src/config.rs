use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::policy::Policy;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "license-audit.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Report format (table, json)
    pub format: Option<String>,

    /// Number of parallel workers
    pub jobs: Option<usize>,

    /// License policy; the audit refuses to run without one
    pub policy: Option<Policy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Some("table".to_string()),
            jobs: None,
            policy: None,
        }
    }
}

fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILE)
}

/// Load configuration from `path`, or from `license-audit.toml` in the working directory.
///
/// A missing default file yields `Config::default()`; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = default_config_path();
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    if config.format.is_none() {
        config.format = Config::default().format;
    }
    if let Some(policy) = &config.policy {
        policy.validate()?;
    }
    Ok(config)
}
