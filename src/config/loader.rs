//! Configuration Loader
//!
//! Environment-aware configuration loading. Layers built-in defaults, an optional
//! base file, an optional per-environment file, and `OLASIMPLE_*` environment
//! variables, in that order of precedence.

use super::OlaConfig;
use crate::error::OlaResult;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const CONFIG_FILE_STEM: &str = "olasimple";
const ENV_PREFIX: &str = "OLASIMPLE";

/// Loaded, validated, immutable configuration
#[derive(Debug)]
pub struct ConfigManager {
    config: Arc<OlaConfig>,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> OlaResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> OlaResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> OlaResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::load_layers(&config_directory, environment)?;
        config.validate()?;

        crate::log_config!(info, "Configuration loaded successfully",
            environment: environment,
            batch_size: config.batch_size,
            kit_num_digits: config.kit_num_digits,
            sample_num_digits: config.sample_num_digits
        );

        Ok(Arc::new(ConfigManager {
            config: Arc::new(config),
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration, validating it first
    pub fn from_config(config: OlaConfig) -> OlaResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config: Arc::new(config),
            environment: Self::detect_environment(),
            config_directory: PathBuf::from("config"),
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &OlaConfig {
        &self.config
    }

    /// Shared handle to the configuration for injection into components
    pub fn shared(&self) -> Arc<OlaConfig> {
        Arc::clone(&self.config)
    }

    /// Get the current environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the configuration directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect current environment from environment variables
    fn detect_environment() -> String {
        env::var("OLASIMPLE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    fn load_layers(config_directory: &Path, environment: &str) -> OlaResult<OlaConfig> {
        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            base = %base_file.display(),
            overrides = %env_file.display(),
            "Resolving configuration layers"
        );

        let layered = Config::builder()
            .add_source(Config::try_from(&OlaConfig::default())?)
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(env_file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(layered.try_deserialize::<OlaConfig>()?)
    }
}
