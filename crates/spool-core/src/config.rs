//! Configuration management for Spool.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Spool configuration, stored as TOML next to the repository metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Canvas decoration settings.
    #[serde(default)]
    pub decor: DecorConfig,

    /// Commit defaults.
    #[serde(default)]
    pub commit: CommitConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Icon sizing for the diff annotator, passed explicitly into each
/// paint call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecorConfig {
    /// Edge length of a step icon on the canvas.
    #[serde(default = "default_icon_size")]
    pub icon_size: i32,

    /// Edge length of the change marker overlay.
    #[serde(default = "default_mini_icon_size")]
    pub mini_icon_size: i32,
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            icon_size: default_icon_size(),
            mini_icon_size: default_mini_icon_size(),
        }
    }
}

const fn default_icon_size() -> i32 {
    32
}

const fn default_mini_icon_size() -> i32 {
    16
}

/// Commit defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitConfig {
    /// Default author in `Name <email>` form, used when the caller
    /// supplies none.
    #[serde(default)]
    pub author: Option<String>,
}
