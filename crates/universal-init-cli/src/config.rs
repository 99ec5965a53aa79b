//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `UNIVERSAL_INIT__SECTION__KEY`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use universal_init_core::domain::{PackageManager, TemplatePackage};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "UNIVERSAL_INIT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used instead of prompting or probing.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Template identifier or alias (`ts`, `js`).
    pub template: Option<String>,
    /// `npm` or `yarn`.
    pub package_manager: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs (without colors) to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the file and the process environment.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        Self::from_sources(&path, required, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
    }

    fn from_sources(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("configuration has invalid values")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.default_package_manager()?;
        self.default_template()?;
        Ok(())
    }

    /// `defaults.package_manager`, parsed.
    pub fn default_package_manager(&self) -> anyhow::Result<Option<PackageManager>> {
        self.defaults
            .package_manager
            .as_deref()
            .map(|pm| {
                pm.parse::<PackageManager>()
                    .with_context(|| "defaults.package_manager must be 'npm' or 'yarn'")
            })
            .transpose()
    }

    /// `defaults.template`, resolved through the template aliases.
    pub fn default_template(&self) -> anyhow::Result<Option<TemplatePackage>> {
        self.defaults
            .template
            .as_deref()
            .map(|id| {
                TemplatePackage::resolve(id)
                    .with_context(|| format!("defaults.template '{id}' is not a valid template"))
            })
            .transpose()
    }

    /// Render as TOML, for `--print-config`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.universal-init.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "universal-init", "universal-init")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".universal-init.toml"))
    }
}
