//! Category model.
//!
//! Categories form a tree per job through optional parent identifiers.
//! The tree itself is never stored; see [`crate::calculation::CategoryTree`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An organizational grouping of line items within a job.
///
/// An absent `surcharge_percent` means the category declares no surcharge of
/// its own. `Some(Decimal::ZERO)` is an explicit 0% and is not the same thing.
///
/// # Example
///
/// ```
/// use quote_engine::models::Category;
/// use rust_decimal::Decimal;
///
/// let electrical = Category {
///     id: "cat-1".to_string(),
///     job_id: "job-1".to_string(),
///     parent_id: None,
///     name: "Electrical".to_string(),
///     surcharge_percent: Some(Decimal::new(5, 0)),
///     sort_order: 0,
/// };
/// assert!(electrical.is_top_level());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: String,
    /// The job this category belongs to.
    pub job_id: String,
    /// The parent category, or `None` for a top-level category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Display name of the category.
    pub name: String,
    /// Surcharge declared by this category, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge_percent: Option<Decimal>,
    /// Position among its siblings.
    #[serde(default)]
    pub sort_order: i32,
}

impl Category {
    /// Returns true if the category has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
