//! Configuration handling
//!
//! Corral reads `config.toml` from the user configuration directory
//! (`~/.config/corral/config.toml` on Linux). The file lists the ordered
//! command root directories and, optionally, where wrapper artifacts are
//! written. Roots passed on the command line replace the configured list
//! for that invocation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Ordered command roots, highest priority first
    pub roots: Vec<PathBuf>,

    /// Where `corral wrapper` writes artifacts (defaults to the first root)
    pub wrapper_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default location
    ///
    /// A missing file is the default configuration; a malformed one is an
    /// error, since the file is user-written.
    pub fn load() -> Result<Self> {
        let config_dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return Ok(Config::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    /// Returns the user configuration directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "corral", "corral").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default commands directory inside the configuration directory
    pub fn default_commands_dir() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("commands"))
    }

    /// Computes the effective ordered root list for one invocation
    ///
    /// Command-line roots replace the configured list entirely; otherwise
    /// the configured roots are used with the default commands directory
    /// appended as the lowest-priority fallback.
    pub fn effective_roots(&self, overrides: &[PathBuf]) -> Vec<PathBuf> {
        if !overrides.is_empty() {
            return overrides.to_vec();
        }

        let mut roots = self.roots.clone();
        if let Some(default) = Self::default_commands_dir() {
            if !roots.contains(&default) {
                roots.push(default);
            }
        }
        roots
    }
}
