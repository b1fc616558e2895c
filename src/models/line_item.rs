//! Line item model and item types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of cost a line item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemType {
    /// Materials and supplies.
    Material,
    /// Labor hours or fixed labor charges.
    Labor,
    /// Equipment rental or usage.
    Equipment,
}

impl LineItemType {
    /// Returns the wire spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemType::Material => "material",
            LineItemType::Labor => "labor",
            LineItemType::Equipment => "equipment",
        }
    }
}

impl fmt::Display for LineItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "material" => Ok(LineItemType::Material),
            "labor" => Ok(LineItemType::Labor),
            "equipment" => Ok(LineItemType::Equipment),
            other => Err(format!("unknown line item type: {}", other)),
        }
    }
}

/// An individual material, labor or equipment entry in a category.
///
/// # Example
///
/// ```
/// use quote_engine::models::{LineItem, LineItemType};
/// use rust_decimal::Decimal;
///
/// let drywall = LineItem {
///     id: "item-1".to_string(),
///     category_id: "cat-1".to_string(),
///     item_type: LineItemType::Material,
///     name: "Drywall sheet".to_string(),
///     description: None,
///     quantity: Decimal::new(25, 1),
///     unit: "sheet".to_string(),
///     unit_price: Decimal::new(40, 0),
///     surcharge_percent: None,
///     sort_order: 0,
/// };
/// assert_eq!(drywall.base_price(), Decimal::new(100, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier for the line item.
    pub id: String,
    /// The category that directly owns this item.
    pub category_id: String,
    /// Material, labor or equipment.
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    /// Display name of the item.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity of units.
    pub quantity: Decimal,
    /// Unit label (e.g., "ea", "hr", "sqft").
    pub unit: String,
    /// Price per unit before surcharge.
    pub unit_price: Decimal,
    /// Surcharge declared by this item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge_percent: Option<Decimal>,
    /// Position within its category.
    #[serde(default)]
    pub sort_order: i32,
}

impl LineItem {
    /// Returns `quantity × unit_price`.
    pub fn base_price(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Suggested unit labels per item type, offered when entering line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonUnits {
    /// Units for material items.
    pub material: Vec<String>,
    /// Units for labor items.
    pub labor: Vec<String>,
    /// Units for equipment items.
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl CommonUnits {
    /// Returns the suggested units for an item type.
    pub fn for_type(&self, item_type: LineItemType) -> &[String] {
        match item_type {
            LineItemType::Material => &self.material,
            LineItemType::Labor => &self.labor,
            LineItemType::Equipment => &self.equipment,
        }
    }
}

impl Default for CommonUnits {
    fn default() -> Self {
        let owned = |units: &[&str]| units.iter().map(|u| u.to_string()).collect();
        Self {
            material: owned(&["ea", "sqft", "lnft", "bundle", "box", "bag", "gal", "sheet"]),
            labor: owned(&["hr", "day", "job", "sqft"]),
            equipment: owned(&["hr", "day", "week", "ea"]),
        }
    }
}
