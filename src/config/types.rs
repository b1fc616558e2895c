//! Configuration types for the quote engine.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use serde::{Deserialize, Serialize};

use crate::models::{CommonUnits, Settings};

/// Structure of `units.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsFile {
    /// Suggested unit labels per line item type.
    pub units: CommonUnits,
}

/// The complete, validated configuration of the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Defaults applied to newly created jobs.
    pub settings: Settings,
    /// Suggested unit labels per line item type.
    #[serde(default)]
    pub units: CommonUnits,
}

impl QuoteConfig {
    /// Creates a configuration from its parts.
    pub fn new(settings: Settings, units: CommonUnits) -> Self {
        Self { settings, units }
    }
}
