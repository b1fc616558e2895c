//! Effective surcharge resolution.
//!
//! A line item's markup may be declared on the job, on any category in its
//! ancestry, and on the item itself. The job's [`SurchargeMode`] selects how
//! those declarations combine into one percentage.

use rust_decimal::Decimal;

use crate::models::{Category, Job, LineItem, LineItemPricing, SurchargeMode};

/// Resolves the surcharge percentage that applies to a line item.
///
/// `chain` is the item's category ancestry, root first and the item's own
/// category last. The resolver does no lookups of its own.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::effective_surcharge;
/// use quote_engine::models::{Category, Job, LineItem, LineItemType, Settings, SurchargeMode};
/// use rust_decimal::Decimal;
///
/// let mut job = Job::from_settings("Garage", &Settings::default());
/// job.surcharge_percent = Decimal::new(10, 0);
///
/// let category = Category {
///     id: "cat-1".to_string(),
///     job_id: job.id.clone(),
///     parent_id: None,
///     name: "Framing".to_string(),
///     surcharge_percent: Some(Decimal::new(5, 0)),
///     sort_order: 0,
/// };
/// let item = LineItem {
///     id: "item-1".to_string(),
///     category_id: "cat-1".to_string(),
///     item_type: LineItemType::Material,
///     name: "Studs".to_string(),
///     description: None,
///     quantity: Decimal::new(10, 0),
///     unit: "ea".to_string(),
///     unit_price: Decimal::new(100, 0),
///     surcharge_percent: None,
///     sort_order: 0,
/// };
///
/// assert_eq!(effective_surcharge(&item, &job, &[&category]), Decimal::new(15, 0));
///
/// job.surcharge_mode = SurchargeMode::Override;
/// assert_eq!(effective_surcharge(&item, &job, &[&category]), Decimal::new(5, 0));
/// ```
pub fn effective_surcharge(item: &LineItem, job: &Job, chain: &[&Category]) -> Decimal {
    match job.surcharge_mode {
        SurchargeMode::Stacking => stacking_surcharge(item, job, chain),
        SurchargeMode::Override => override_surcharge(item, job, chain),
    }
}

/// Sums the job surcharge, every declared category surcharge and the item's own.
///
/// Absent declarations are skipped.
pub fn stacking_surcharge(item: &LineItem, job: &Job, chain: &[&Category]) -> Decimal {
    let categories: Decimal = chain.iter().filter_map(|c| c.surcharge_percent).sum();
    job.surcharge_percent + categories + item.surcharge_percent.unwrap_or(Decimal::ZERO)
}

/// Returns the most specific declared surcharge.
///
/// Priority: item, then the chain from leaf back to root, then the job.
pub fn override_surcharge(item: &LineItem, job: &Job, chain: &[&Category]) -> Decimal {
    item.surcharge_percent
        .or_else(|| chain.iter().rev().find_map(|c| c.surcharge_percent))
        .unwrap_or(job.surcharge_percent)
}

/// Applies a surcharge to the item's base price: `base × (1 + surcharge / 100)`.
///
/// No rounding is applied.
pub fn final_price(item: &LineItem, effective_surcharge: Decimal) -> Decimal {
    item.base_price() * (Decimal::ONE + effective_surcharge / Decimal::ONE_HUNDRED)
}

/// Resolves the surcharge for an item and prices it.
pub fn price_line_item(item: &LineItem, job: &Job, chain: &[&Category]) -> LineItemPricing {
    let effective = effective_surcharge(item, job, chain);
    LineItemPricing {
        line_item_id: item.id.clone(),
        category_id: item.category_id.clone(),
        item_type: item.item_type,
        base_price: item.base_price(),
        effective_surcharge: effective,
        final_price: final_price(item, effective),
    }
}

/// The pricing step of a line item that exceeds the range of [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOverflow {
    /// `quantity × unit_price` overflows.
    BasePrice,
    /// The combined surcharge overflows.
    Surcharge,
    /// Applying the surcharge to the base price overflows.
    FinalPrice,
}

/// Computes the same final price as [`price_line_item`], reporting overflow
/// instead of panicking.
///
/// For inputs with non-negative quantities, prices and surcharges, a success
/// here guarantees the unchecked pricing path cannot overflow either.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::{PriceOverflow, checked_final_price};
/// use quote_engine::models::{Job, LineItem, LineItemType, Settings};
/// use rust_decimal::Decimal;
///
/// let job = Job::from_settings("Shed", &Settings::default());
/// let item = LineItem {
///     id: "item-1".to_string(),
///     category_id: "cat-1".to_string(),
///     item_type: LineItemType::Material,
///     name: "Sheet".to_string(),
///     description: None,
///     quantity: Decimal::MAX,
///     unit: "sheet".to_string(),
///     unit_price: Decimal::TWO,
///     surcharge_percent: None,
///     sort_order: 0,
/// };
///
/// assert_eq!(checked_final_price(&item, &job, &[]), Err(PriceOverflow::BasePrice));
/// ```
pub fn checked_final_price(
    item: &LineItem,
    job: &Job,
    chain: &[&Category],
) -> Result<Decimal, PriceOverflow> {
    let base = item
        .quantity
        .checked_mul(item.unit_price)
        .ok_or(PriceOverflow::BasePrice)?;

    let surcharge = match job.surcharge_mode {
        SurchargeMode::Stacking => chain
            .iter()
            .filter_map(|c| c.surcharge_percent)
            .chain(item.surcharge_percent)
            .try_fold(job.surcharge_percent, |acc, p| acc.checked_add(p))
            .ok_or(PriceOverflow::Surcharge)?,
        SurchargeMode::Override => override_surcharge(item, job, chain),
    };

    let factor = (surcharge / Decimal::ONE_HUNDRED)
        .checked_add(Decimal::ONE)
        .ok_or(PriceOverflow::Surcharge)?;
    base.checked_mul(factor).ok_or(PriceOverflow::FinalPrice)
}
