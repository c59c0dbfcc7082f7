//! Overflow configuration file handling

use anyhow::{Context, Result};
use overflow_widgets::OverflowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "overflow.toml";

/// Top-level configuration (overflow.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// Container options
    #[serde(default)]
    pub container: OverflowConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Headless run options
#[derive(Debug, Deserialize, Serialize)]
pub struct RunConfig {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl CliConfig {
    /// Load an explicit configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No {} found at {}", CONFIG_FILE, config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load `path` if given, else `overflow.toml` in the working directory if
    /// present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.run.tick_ms == 0 {
            anyhow::bail!("[run] tick_ms must be at least 1");
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
