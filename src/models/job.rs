//! Job model, surcharge modes and application-wide settings.
//!
//! A [`Job`] is the top-level container of a quote. Its surcharge mode
//! decides how markup declared at the job, category and line item levels
//! combines into the single percentage applied to each line item.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How surcharges declared at different levels of a quote combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeMode {
    /// Every level that declares a surcharge adds to the total.
    #[default]
    Stacking,
    /// The most specific declared surcharge wins.
    Override,
}

impl SurchargeMode {
    /// Returns the wire spelling of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SurchargeMode::Stacking => "stacking",
            SurchargeMode::Override => "override",
        }
    }
}

impl fmt::Display for SurchargeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurchargeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stacking" => Ok(SurchargeMode::Stacking),
            "override" => Ok(SurchargeMode::Override),
            other => Err(format!("unknown surcharge mode: {}", other)),
        }
    }
}

/// Application-wide defaults copied into every newly created job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Surcharge mode given to new jobs.
    pub default_surcharge_mode: SurchargeMode,
    /// Job-level surcharge percentage given to new jobs.
    pub default_surcharge_percent: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_surcharge_mode: SurchargeMode::Stacking,
            default_surcharge_percent: Decimal::ZERO,
        }
    }
}

/// The top-level container for a quote.
///
/// # Example
///
/// ```
/// use quote_engine::models::{Job, Settings, SurchargeMode};
/// use rust_decimal::Decimal;
///
/// let settings = Settings {
///     default_surcharge_mode: SurchargeMode::Override,
///     default_surcharge_percent: Decimal::new(12, 0),
/// };
/// let job = Job::from_settings("Smith Kitchen Remodel", &settings);
///
/// assert_eq!(job.surcharge_mode, SurchargeMode::Override);
/// assert_eq!(job.surcharge_percent, Decimal::new(12, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for the job.
    pub id: String,
    /// Display name of the job.
    pub name: String,
    /// Optional customer the quote is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Job-level surcharge percentage. Always present, defaults to zero.
    #[serde(default)]
    pub surcharge_percent: Decimal,
    /// How surcharges from the job, its categories and line items combine.
    #[serde(default)]
    pub surcharge_mode: SurchargeMode,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job with a fresh identifier and the surcharge defaults from `settings`.
    pub fn from_settings(name: impl Into<String>, settings: &Settings) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            customer_name: None,
            surcharge_percent: settings.default_surcharge_percent,
            surcharge_mode: settings.default_surcharge_mode,
            created_at: Utc::now(),
        }
    }
}
