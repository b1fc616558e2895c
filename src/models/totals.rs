//! Output value types produced by the totals engine.
//!
//! None of these are persisted; they are recomputed from a job snapshot on
//! every request.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LineItemType;

/// Totals for one category, including every descendant category.
///
/// # Example
///
/// ```
/// use quote_engine::models::CategoryTotal;
/// use rust_decimal::Decimal;
///
/// let total = CategoryTotal::zero("cat-1");
/// assert_eq!(total.total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category these totals are for.
    pub category_id: String,
    /// Sum of base prices.
    pub subtotal: Decimal,
    /// `total - subtotal`.
    pub surcharge_total: Decimal,
    /// Sum of final prices.
    pub total: Decimal,
}

impl CategoryTotal {
    /// Returns all-zero totals for a category.
    pub fn zero(category_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            subtotal: Decimal::ZERO,
            surcharge_total: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Totals for a whole job, with final prices split by item type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTotal {
    /// Sum of all base prices.
    pub subtotal: Decimal,
    /// `grand_total - subtotal`.
    pub surcharge_total: Decimal,
    /// Sum of all final prices.
    pub grand_total: Decimal,
    /// Final prices of material items.
    pub material_subtotal: Decimal,
    /// Final prices of labor items.
    pub labor_subtotal: Decimal,
    /// Final prices of equipment items.
    pub equipment_subtotal: Decimal,
}

impl JobTotal {
    pub(crate) fn subtotal_for_mut(&mut self, item_type: LineItemType) -> &mut Decimal {
        match item_type {
            LineItemType::Material => &mut self.material_subtotal,
            LineItemType::Labor => &mut self.labor_subtotal,
            LineItemType::Equipment => &mut self.equipment_subtotal,
        }
    }
}

/// The resolved pricing of a single line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPricing {
    /// The priced line item.
    pub line_item_id: String,
    /// The category that directly owns the item.
    pub category_id: String,
    /// Material, labor or equipment.
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    /// `quantity × unit_price`.
    pub base_price: Decimal,
    /// The surcharge percentage that applies to the item.
    pub effective_surcharge: Decimal,
    /// `base_price × (1 + effective_surcharge / 100)`.
    pub final_price: Decimal,
}

/// A complete pricing snapshot of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The job that was priced.
    pub job_id: String,
    /// Job-level totals.
    pub totals: JobTotal,
    /// Totals per category, each including its descendants.
    pub categories: Vec<CategoryTotal>,
    /// Per-item pricing in input order.
    pub line_items: Vec<LineItemPricing>,
}
