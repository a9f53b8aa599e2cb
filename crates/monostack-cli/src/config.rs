//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config`, else the platform config dir)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog file overrides.
    pub catalog: CatalogConfig,
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Installer settings.
    pub install: InstallConfig,
}

/// Where the install-command catalog and compose template come from.
///
/// Both unset means the built-in catalog is used. Setting only one of the
/// two is rejected at load time — a half-replaced catalog pairs commands
/// with a template that does not know its services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub commands_path: Option<PathBuf>,
    pub compose_template_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_name: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Per-command timeout for installers and git, in seconds.
    /// Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load configuration from `config_file` (the `--config` value) or the
    /// default location. A missing default file yields the built-in
    /// defaults; a missing explicit file is an error.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, explicit) = match config_file {
            Some(p) => (p.clone(), true),
            None => (Self::config_path(), false),
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CliError::ConfigError {
                    message: format!("cannot read {}", path.display()),
                    source: Some(Box::new(e)),
                });
            }
        };

        let config: Self = toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        let commands = self.catalog.commands_path.is_some();
        let template = self.catalog.compose_template_path.is_some();
        if commands != template {
            return Err(CliError::ConfigError {
                message: "catalog.commands_path and catalog.compose_template_path \
                          must be set together"
                    .into(),
                source: None,
            });
        }
        Ok(())
    }

    /// The per-command timeout as a [`Duration`], if configured.
    pub fn command_timeout(&self) -> Option<Duration> {
        self.install.timeout_secs.map(Duration::from_secs)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.monostack.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "monostack", "monostack")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".monostack.toml"))
    }
}
