//! Request types for the quote engine API.
//!
//! The engine is stateless, so every totals request carries the complete
//! snapshot of a job: the job itself, its categories and its line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Job, LineItem, LineItemType, SurchargeMode};

/// Request body for the `/quote/totals` and `/quote/categories/:id/total`
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The job being quoted.
    pub job: JobRequest,
    /// Every category of the job.
    #[serde(default)]
    pub categories: Vec<CategoryRequest>,
    /// Every line item of the job.
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

impl QuoteRequest {
    /// Converts the request into domain types.
    ///
    /// Categories that omit `job_id` are attached to the request's job.
    pub fn into_parts(self) -> (Job, Vec<Category>, Vec<LineItem>) {
        let job: Job = self.job.into();
        let categories = self
            .categories
            .into_iter()
            .map(|c| c.into_category(&job.id))
            .collect();
        let line_items = self.line_items.into_iter().map(Into::into).collect();
        (job, categories, line_items)
    }
}

/// Job information in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Unique identifier for the job.
    pub id: String,
    /// Display name of the job.
    #[serde(default)]
    pub name: String,
    /// Optional customer name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Job-level surcharge percentage.
    #[serde(default)]
    pub surcharge_percent: Decimal,
    /// How surcharges combine across levels.
    #[serde(default)]
    pub surcharge_mode: SurchargeMode,
    /// When the job was created. Defaults to the time of the request.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Category information in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    /// Unique identifier for the category.
    pub id: String,
    /// The owning job. Defaults to the request's job.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Parent category, or `None` for top level.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name of the category.
    #[serde(default)]
    pub name: String,
    /// Surcharge declared by the category, if any.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
    /// Position among its siblings.
    #[serde(default)]
    pub sort_order: i32,
}

/// Line item information in a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// Unique identifier for the line item.
    pub id: String,
    /// The category the item belongs to.
    pub category_id: String,
    /// Material, labor or equipment.
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    /// Display name of the item.
    #[serde(default)]
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of units.
    pub quantity: Decimal,
    /// Unit label, e.g. `sqft` or `hr`.
    #[serde(default)]
    pub unit: String,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Surcharge declared by the item, if any.
    #[serde(default)]
    pub surcharge_percent: Option<Decimal>,
    /// Position within its category.
    #[serde(default)]
    pub sort_order: i32,
}

impl From<JobRequest> for Job {
    fn from(req: JobRequest) -> Self {
        Job {
            id: req.id,
            name: req.name,
            customer_name: req.customer_name,
            surcharge_percent: req.surcharge_percent,
            surcharge_mode: req.surcharge_mode,
            created_at: req.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl CategoryRequest {
    fn into_category(self, job_id: &str) -> Category {
        Category {
            id: self.id,
            job_id: self.job_id.unwrap_or_else(|| job_id.to_string()),
            parent_id: self.parent_id,
            name: self.name,
            surcharge_percent: self.surcharge_percent,
            sort_order: self.sort_order,
        }
    }
}

impl From<LineItemRequest> for LineItem {
    fn from(req: LineItemRequest) -> Self {
        LineItem {
            id: req.id,
            category_id: req.category_id,
            item_type: req.item_type,
            name: req.name,
            description: req.description,
            quantity: req.quantity,
            unit: req.unit,
            unit_price: req.unit_price,
            surcharge_percent: req.surcharge_percent,
            sort_order: req.sort_order,
        }
    }
}
