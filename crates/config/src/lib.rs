#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for keg
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/keg/config.toml)
//! - Environment variables
//! - CLI flags

pub mod constants;

use keg_errors::{ConfigError, Error};
use keg_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub blacklist: BlacklistConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Path configuration
///
/// Unset entries fall back to [`constants`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub prefix: Option<PathBuf>,
    pub cellar: Option<PathBuf>,
    /// Root of the formula repository
    pub repository: Option<PathBuf>,
    /// The keg executable checked before running under sudo
    pub installer: Option<PathBuf>,
}

/// Extra names that should not be installed without `--force`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlacklistConfig {
    /// Formula name to the advisory shown instead of installing it
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("keg").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: &Option<PathBuf>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // KEG_OUTPUT
        if let Ok(output) = std::env::var("KEG_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "KEG_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // KEG_COLOR
        if let Ok(color) = std::env::var("KEG_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "KEG_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        if let Some(prefix) = env_path("KEG_PREFIX")? {
            self.paths.prefix = Some(prefix);
        }
        if let Some(cellar) = env_path("KEG_CELLAR")? {
            self.paths.cellar = Some(cellar);
        }
        if let Some(repository) = env_path("KEG_REPOSITORY")? {
            self.paths.repository = Some(repository);
        }

        Ok(())
    }

    /// Installation prefix (with default)
    #[must_use]
    pub fn prefix(&self) -> PathBuf {
        self.paths
            .prefix
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::PREFIX))
    }

    /// Package store root. Defaults to `Cellar` under the configured prefix.
    #[must_use]
    pub fn cellar(&self) -> PathBuf {
        match (&self.paths.cellar, &self.paths.prefix) {
            (Some(cellar), _) => cellar.clone(),
            (None, Some(prefix)) => prefix.join("Cellar"),
            (None, None) => PathBuf::from(constants::CELLAR),
        }
    }

    /// Formula repository root. Defaults to the prefix.
    #[must_use]
    pub fn repository(&self) -> PathBuf {
        self.paths
            .repository
            .clone()
            .unwrap_or_else(|| self.prefix())
    }

    /// Directory holding formula definitions
    #[must_use]
    pub fn formula_dir(&self) -> PathBuf {
        self.repository().join(constants::FORMULA_DIR)
    }

    /// The keg executable, used by the sudo ownership check
    #[must_use]
    pub fn installer_executable(&self) -> PathBuf {
        self.paths.installer.clone().unwrap_or_else(|| {
            std::env::current_exe().unwrap_or_else(|_| self.prefix().join("bin").join("keg"))
        })
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        match &self.paths.prefix {
            Some(prefix) => prefix.join("var").join("log").join("keg"),
            None => PathBuf::from(constants::LOGS_DIR),
        }
    }
}

fn env_path(var: &str) -> Result<Option<PathBuf>, Error> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue {
            field: var.to_string(),
            value,
        }
        .into()),
        Ok(value) => Ok(Some(PathBuf::from(value))),
        Err(_) => Ok(None),
    }
}
