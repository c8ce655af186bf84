//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::generation::DEFAULT_MAX_ATTEMPTS;
use crate::services::CommandGenerator;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the 13 token files
    pub tokens_dir: Option<PathBuf>,
}

/// Content generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// External command producing content matrix JSON on stdout
    #[serde(default)]
    pub command: Option<String>,
    /// Arguments passed to the command
    #[serde(default)]
    pub args: Vec<String>,
    /// Attempts per entry before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl GenerationConfig {
    /// Builds the configured generator, if a command is set.
    pub fn generator(&self) -> Option<CommandGenerator> {
        self.command
            .as_ref()
            .map(|command| CommandGenerator::new(command.clone(), self.args.clone()))
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/figma-content/config.toml`
/// - macOS: `~/Library/Application Support/figma-content/config.toml`
/// - Windows: `%APPDATA%\figma-content\config.toml`
///
/// # Example
///
/// ```toml
/// [paths]
/// tokens_dir = "/work/design-tokens"
///
/// [generation]
/// command = "content-model"
/// args = ["--model", "fast"]
/// max_attempts = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("figma-content");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create config directory: {}",
                parent.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.generation.max_attempts == 0 {
            anyhow::bail!("generation.max_attempts must be at least 1");
        }

        if let Some(command) = &self.generation.command {
            if command.trim().is_empty() {
                anyhow::bail!("generation.command must not be empty");
            }
        }

        Ok(())
    }

    /// Resolves the token directory.
    ///
    /// An explicit override wins, then the configured path, then the current
    /// directory.
    pub fn tokens_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.paths.tokens_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
