//! Form-style inputs for creating or updating jobs, categories, line items
//! and settings.
//!
//! Enumerated fields arrive as plain strings so that an unknown value is
//! reported alongside every other field problem instead of failing
//! deserialization outright.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Category, Job, LineItem, LineItemType, Settings, SurchargeMode};

use super::{ValidationError, check_name, check_quantity, check_surcharge, check_unit_price};

const SURCHARGE_MODE_MESSAGE: &str = "Surcharge mode must be 'stacking' or 'override'";

fn into_result(errors: Vec<ValidationError>) -> EngineResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation { errors })
    }
}

/// Input for creating or updating a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    /// Display name of the job.
    pub name: String,
    /// Optional customer name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Job-level surcharge. Settings default when absent.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
    /// `stacking` or `override`. Settings default when absent or empty.
    #[serde(default)]
    pub surcharge_mode: Option<String>,
}

impl JobInput {
    /// Checks the input, returning every field error found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_name("name", &self.name, &mut errors);

        if let Some(mode) = self.surcharge_mode.as_deref().filter(|m| !m.is_empty()) {
            if mode.parse::<SurchargeMode>().is_err() {
                errors.push(ValidationError::new("surcharge_mode", SURCHARGE_MODE_MESSAGE));
            }
        }

        check_surcharge("surcharge_percent", self.surcharge_percent, &mut errors);

        errors
    }

    /// Validates the input and builds a new job, filling unset surcharge
    /// fields from `settings`.
    ///
    /// # Example
    ///
    /// ```
    /// use quote_engine::models::{Settings, SurchargeMode};
    /// use quote_engine::validation::JobInput;
    ///
    /// let input = JobInput {
    ///     name: "Porch rebuild".to_string(),
    ///     surcharge_mode: Some("override".to_string()),
    ///     ..JobInput::default()
    /// };
    /// let job = input.into_job(&Settings::default())?;
    /// assert_eq!(job.surcharge_mode, SurchargeMode::Override);
    /// # Ok::<(), quote_engine::error::EngineError>(())
    /// ```
    pub fn into_job(self, settings: &Settings) -> EngineResult<Job> {
        into_result(self.validate())?;

        let mut job = Job::from_settings(self.name.trim(), settings);
        job.customer_name = self.customer_name.filter(|c| !c.trim().is_empty());
        if let Some(percent) = self.surcharge_percent {
            job.surcharge_percent = percent;
        }
        if let Some(mode) = self.surcharge_mode.as_deref().filter(|m| !m.is_empty()) {
            job.surcharge_mode = mode.parse().unwrap_or(settings.default_surcharge_mode);
        }
        Ok(job)
    }
}

/// Input for creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    /// The job the category belongs to.
    pub job_id: String,
    /// Parent category, or `None` for top level.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name of the category.
    pub name: String,
    /// Surcharge declared by the category, if any.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
    /// Position among its siblings.
    #[serde(default)]
    pub sort_order: i32,
}

impl CategoryInput {
    /// Checks the input, returning every field error found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_name("name", &self.name, &mut errors);
        check_surcharge("surcharge_percent", self.surcharge_percent, &mut errors);
        errors
    }

    /// Validates the input and builds a category with a fresh identifier.
    ///
    /// Nesting depth depends on the other categories of the job and is
    /// checked separately with [`super::validate_category_depth`].
    pub fn into_category(self) -> EngineResult<Category> {
        into_result(self.validate())?;
        Ok(Category {
            id: Uuid::new_v4().to_string(),
            job_id: self.job_id,
            parent_id: self.parent_id,
            name: self.name.trim().to_string(),
            surcharge_percent: self.surcharge_percent,
            sort_order: self.sort_order,
        })
    }
}

/// Input for creating or updating a line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// The category that owns the item.
    pub category_id: String,
    /// `material`, `labor` or `equipment`.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Display name of the item.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Quantity of units. Must be greater than zero.
    pub quantity: Decimal,
    /// Unit label.
    pub unit: String,
    /// Price per unit. Must not be negative.
    pub unit_price: Decimal,
    /// Surcharge declared by the item, if any.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
    /// Position within its category.
    #[serde(default)]
    pub sort_order: i32,
}

impl LineItemInput {
    /// Checks the input, returning every field error found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_name("name", &self.name, &mut errors);

        if self.item_type.parse::<LineItemType>().is_err() {
            errors.push(ValidationError::new(
                "type",
                "Type must be 'material', 'labor' or 'equipment'",
            ));
        }

        check_quantity("quantity", self.quantity, &mut errors);

        if self.unit.trim().is_empty() {
            errors.push(ValidationError::new("unit", "Unit is required"));
        }

        check_unit_price("unit_price", self.unit_price, &mut errors);
        check_surcharge("surcharge_percent", self.surcharge_percent, &mut errors);

        errors
    }

    /// Validates the input and builds a line item with a fresh identifier.
    pub fn into_line_item(self) -> EngineResult<LineItem> {
        let errors = self.validate();
        let item_type = match self.item_type.parse::<LineItemType>() {
            Ok(item_type) if errors.is_empty() => item_type,
            _ => return Err(EngineError::Validation { errors }),
        };

        Ok(LineItem {
            id: Uuid::new_v4().to_string(),
            category_id: self.category_id,
            item_type,
            name: self.name.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            unit_price: self.unit_price,
            surcharge_percent: self.surcharge_percent,
            sort_order: self.sort_order,
        })
    }
}

/// Input for updating the application-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsInput {
    /// `stacking` or `override`.
    pub default_surcharge_mode: String,
    /// Job-level surcharge given to new jobs.
    #[serde(default)]
    pub default_surcharge_percent: Decimal,
}

impl SettingsInput {
    /// Checks the input, returning every field error found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.default_surcharge_mode.parse::<SurchargeMode>().is_err() {
            errors.push(ValidationError::new(
                "default_surcharge_mode",
                SURCHARGE_MODE_MESSAGE,
            ));
        }

        check_surcharge(
            "default_surcharge_percent",
            Some(self.default_surcharge_percent),
            &mut errors,
        );

        errors
    }

    /// Validates the input and converts it into [`Settings`].
    pub fn into_settings(self) -> EngineResult<Settings> {
        let errors = self.validate();
        match self.default_surcharge_mode.parse::<SurchargeMode>() {
            Ok(mode) if errors.is_empty() => Ok(Settings {
                default_surcharge_mode: mode,
                default_surcharge_percent: self.default_surcharge_percent,
            }),
            _ => Err(EngineError::Validation { errors }),
        }
    }
}
