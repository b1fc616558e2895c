//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine's
//! settings and unit lists from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{CommonUnits, Job, LineItemType, Settings};
use crate::validation::{JobInput, SettingsInput};

use super::types::{QuoteConfig, UnitsFile};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Default surcharge mode and percent for new jobs
/// └── units.yaml      # Optional; suggested unit labels per item type
/// ```
///
/// # Example
///
/// ```no_run
/// use quote_engine::config::ConfigLoader;
/// use quote_engine::models::LineItemType;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Labor units: {:?}", loader.units_for(LineItemType::Labor));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: QuoteConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `settings.yaml` is missing (`ConfigNotFound`)
    /// - a file contains invalid YAML (`ConfigParseError`)
    /// - the settings hold an unknown mode or a negative percent (`InvalidConfig`)
    ///
    /// A missing `units.yaml` falls back to [`CommonUnits::default`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_settings(&settings_path)?;

        let units_path = path.join("units.yaml");
        let units = if units_path.exists() {
            Self::load_yaml::<UnitsFile>(&units_path)?.units
        } else {
            debug!(path = %units_path.display(), "No units file, using built-in units");
            CommonUnits::default()
        };

        info!(
            path = %path.display(),
            default_surcharge_mode = %settings.default_surcharge_mode,
            default_surcharge_percent = %settings.default_surcharge_percent,
            "Loaded quote configuration"
        );

        Ok(Self::from_config(QuoteConfig::new(settings, units)))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn load_settings(path: &Path) -> EngineResult<Settings> {
        let input = Self::load_yaml::<SettingsInput>(path)?;
        input.into_settings().map_err(|e| match e {
            EngineError::Validation { errors } => EngineError::InvalidConfig {
                path: path.display().to_string(),
                errors,
            },
            other => other,
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Returns the defaults applied to new jobs.
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    /// Returns the suggested unit labels for every item type.
    pub fn units(&self) -> &CommonUnits {
        &self.config.units
    }

    /// Returns the suggested unit labels for one item type.
    pub fn units_for(&self, item_type: LineItemType) -> &[String] {
        self.config.units.for_type(item_type)
    }

    /// Validates `input` and creates a job seeded with the configured defaults.
    pub fn new_job(&self, input: JobInput) -> EngineResult<Job> {
        input.into_job(self.settings())
    }
}
