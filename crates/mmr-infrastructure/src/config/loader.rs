//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values, using Figment.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mmr_application::ComponentManager;
use mmr_domain::error::{Error, Result};

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables with prefix, nested keys split on `__`
    ///    (e.g. `MMR__COMPONENTS__TEXT_EMBEDDING__IMPLEMENTATION_TYPE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some((path, found)) = self.config_source() {
            if found {
                figment = figment.merge(Toml::file(&path));
            }
            log_config_loaded(&path, found);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Full configuration template as TOML
    ///
    /// Defaults for every section, plus the aggregated component template
    /// covering every registered implementation of every category.
    pub fn generate_template(manager: &ComponentManager) -> Result<String> {
        let components = manager
            .config_template()
            .into_iter()
            .map(|(category, config)| (category, config.to_value()))
            .collect();
        let config = AppConfig {
            components,
            ..AppConfig::default()
        };
        toml::to_string_pretty(&config).context("Failed to serialize config template")
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// File `load` reads, with whether it exists
    ///
    /// An explicit path is reported even when missing. Without one, the
    /// first existing default location is reported, or `None`.
    pub fn config_source(&self) -> Option<(PathBuf, bool)> {
        match &self.config_path {
            Some(path) => Some((path.clone(), path.exists())),
            None => Self::find_default_config_path().map(|path| (path, true)),
        }
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(current_dir.join("config").join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Component sections are not checked here; the component manager
/// validates them when the tree is applied.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    if config.pipeline.call_timeout_secs == 0 {
        return Err(Error::configuration("pipeline", "call_timeout_secs cannot be 0"));
    }
    if config.pipeline.audio_prefix.trim().is_empty() {
        return Err(Error::configuration("pipeline", "audio_prefix cannot be empty"));
    }
    if config.audio.ffmpeg_path.as_os_str().is_empty() {
        return Err(Error::configuration("audio", "ffmpeg_path cannot be empty"));
    }
    Ok(())
}
