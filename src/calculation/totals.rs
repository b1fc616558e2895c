//! Job and category totals aggregation.
//!
//! Every entry point rebuilds its [`CategoryTree`] from the inputs it is
//! given and keeps nothing between calls, so repeated calls on the same
//! snapshot give identical results.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Category, CategoryTotal, Job, JobTotal, LineItem, LineItemPricing, QuoteResult,
};

use super::category_tree::{CategoryTree, ChainCache};
use super::surcharge::price_line_item;

fn add_to_job_total(total: &mut JobTotal, pricing: &LineItemPricing) {
    total.subtotal += pricing.base_price;
    total.grand_total += pricing.final_price;
    *total.subtotal_for_mut(pricing.item_type) += pricing.final_price;
}

fn finish_job_total(mut total: JobTotal) -> JobTotal {
    total.surcharge_total = total.grand_total - total.subtotal;
    total
}

fn sum_category_total<'p>(
    category_id: &str,
    pricings: impl Iterator<Item = &'p LineItemPricing>,
) -> CategoryTotal {
    let mut subtotal = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    for pricing in pricings {
        subtotal += pricing.base_price;
        total += pricing.final_price;
    }
    CategoryTotal {
        category_id: category_id.to_string(),
        subtotal,
        surcharge_total: total - subtotal,
        total,
    }
}

fn price_all<'a>(
    job: &Job,
    tree: &CategoryTree<'a>,
    line_items: impl Iterator<Item = &'a LineItem>,
) -> Vec<LineItemPricing> {
    let mut chains = ChainCache::new(tree);
    let pricings: Vec<LineItemPricing> = line_items
        .map(|item| price_line_item(item, job, chains.chain(item.category_id.as_str())))
        .collect();
    debug!(
        job_id = %job.id,
        categories = tree.len(),
        line_items = pricings.len(),
        chains_resolved = chains.resolved(),
        "Priced line items"
    );
    pricings
}

/// Computes job-level totals over every line item of a job.
///
/// Each item's final price lands in exactly one of the material, labor or
/// equipment buckets. `surcharge_total` is always `grand_total - subtotal`.
/// Empty inputs yield all-zero totals.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::calculate_job_total;
/// use quote_engine::models::{Job, Settings};
/// use rust_decimal::Decimal;
///
/// let job = Job::from_settings("Empty", &Settings::default());
/// let total = calculate_job_total(&job, &[], &[]);
/// assert_eq!(total.grand_total, Decimal::ZERO);
/// ```
pub fn calculate_job_total(job: &Job, categories: &[Category], line_items: &[LineItem]) -> JobTotal {
    let tree = CategoryTree::new(categories);
    let mut total = JobTotal::default();
    for pricing in price_all(job, &tree, line_items.iter()) {
        add_to_job_total(&mut total, &pricing);
    }
    finish_job_total(total)
}

/// Computes totals for one category and all of its descendants.
///
/// Only line items whose category is the target or one of its descendants
/// contribute. Surcharges still resolve against each item's full ancestry,
/// including ancestors above the target.
pub fn calculate_category_total(
    category_id: &str,
    job: &Job,
    categories: &[Category],
    line_items: &[LineItem],
) -> CategoryTotal {
    let tree = CategoryTree::new(categories);
    let closure = tree.descendants(category_id);
    let in_scope = line_items
        .iter()
        .filter(|item| closure.contains(item.category_id.as_str()));
    let pricings = price_all(job, &tree, in_scope);
    sum_category_total(category_id, pricings.iter())
}

/// Prices a whole job in one pass.
///
/// Returns the job totals, a [`CategoryTotal`] for every category in display
/// order and the pricing of every line item in input order. The category
/// tree and chain cache are shared by all of it.
pub fn calculate_quote(job: &Job, categories: &[Category], line_items: &[LineItem]) -> QuoteResult {
    let tree = CategoryTree::new(categories);
    let pricings = price_all(job, &tree, line_items.iter());

    let mut totals = JobTotal::default();
    for pricing in &pricings {
        add_to_job_total(&mut totals, pricing);
    }

    let category_totals = tree
        .in_display_order()
        .into_iter()
        .map(|category| {
            let closure = tree.descendants(category.id.as_str());
            sum_category_total(
                &category.id,
                pricings
                    .iter()
                    .filter(|p| closure.contains(p.category_id.as_str())),
            )
        })
        .collect();

    QuoteResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        job_id: job.id.clone(),
        totals: finish_job_total(totals),
        categories: category_totals,
        line_items: pricings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItemType, Settings, SurchargeMode};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn job(percent: &str, mode: SurchargeMode) -> Job {
        let mut job = Job::from_settings("Test job", &Settings::default());
        job.id = "job-1".to_string();
        job.surcharge_percent = dec(percent);
        job.surcharge_mode = mode;
        job
    }

    fn category(id: &str, parent: Option<&str>, surcharge: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            job_id: "job-1".to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_string(),
            surcharge_percent: surcharge.map(dec),
            sort_order: 0,
        }
    }

    fn item(
        id: &str,
        category_id: &str,
        item_type: LineItemType,
        quantity: &str,
        unit_price: &str,
        surcharge: Option<&str>,
    ) -> LineItem {
        LineItem {
            id: id.to_string(),
            category_id: category_id.to_string(),
            item_type,
            name: id.to_string(),
            description: None,
            quantity: dec(quantity),
            unit: "ea".to_string(),
            unit_price: dec(unit_price),
            surcharge_percent: surcharge.map(dec),
            sort_order: 0,
        }
    }

    #[test]
    fn test_job_total_stacking_scenario() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![category("cat-1", None, Some("5"))];
        let items = vec![
            item("item-1", "cat-1", LineItemType::Material, "10", "100", None),
            item("item-2", "cat-1", LineItemType::Labor, "5", "50", None),
        ];

        let total = calculate_job_total(&job, &categories, &items);

        assert_eq!(total.subtotal, dec("1250"));
        assert_eq!(total.grand_total, dec("1437.5"));
        assert_eq!(total.material_subtotal, dec("1150"));
        assert_eq!(total.labor_subtotal, dec("287.5"));
        assert_eq!(total.equipment_subtotal, Decimal::ZERO);
        assert_eq!(total.surcharge_total, dec("187.5"));
    }

    #[test]
    fn test_job_total_empty_job_is_all_zero() {
        let job = job("10", SurchargeMode::Stacking);
        let total = calculate_job_total(&job, &[], &[]);

        assert_eq!(total, JobTotal::default());
    }

    #[test]
    fn test_job_total_equipment_bucket() {
        let job = job("0", SurchargeMode::Override);
        let categories = vec![category("cat-1", None, Some("20"))];
        let items = vec![item(
            "lift",
            "cat-1",
            LineItemType::Equipment,
            "2",
            "150",
            None,
        )];

        let total = calculate_job_total(&job, &categories, &items);

        assert_eq!(total.equipment_subtotal, dec("360"));
        assert_eq!(total.grand_total, dec("360"));
        assert_eq!(total.surcharge_total, dec("60"));
    }

    #[test]
    fn test_job_total_three_level_nesting() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![
            category("l1", None, Some("5")),
            category("l2", Some("l1"), Some("3")),
            category("l3", Some("l2"), Some("2")),
        ];
        let items = vec![item("deep", "l3", LineItemType::Material, "1", "100", None)];

        let total = calculate_job_total(&job, &categories, &items);

        assert_eq!(total.grand_total, dec("120"));
    }

    #[test]
    fn test_job_total_override_uses_most_specific_level() {
        let job = job("15", SurchargeMode::Override);
        let categories = vec![
            category("top", None, Some("10")),
            category("sub", Some("top"), None),
        ];
        let items = vec![
            item("a", "sub", LineItemType::Material, "1", "100", Some("5")),
            item("b", "sub", LineItemType::Material, "1", "100", None),
        ];

        let total = calculate_job_total(&job, &categories, &items);

        // 105 + 110
        assert_eq!(total.grand_total, dec("215"));
    }

    #[test]
    fn test_job_total_item_in_unknown_category() {
        let job = job("10", SurchargeMode::Stacking);
        let items = vec![item("stray", "missing", LineItemType::Labor, "1", "100", None)];

        let total = calculate_job_total(&job, &[], &items);

        assert_eq!(total.labor_subtotal, dec("110"));
    }

    #[test]
    fn test_job_total_survives_category_cycle() {
        let job = job("0", SurchargeMode::Stacking);
        let categories = vec![
            category("a", Some("b"), Some("1")),
            category("b", Some("a"), Some("2")),
        ];
        let items = vec![item("x", "a", LineItemType::Material, "1", "100", None)];

        let total = calculate_job_total(&job, &categories, &items);

        assert_eq!(total.grand_total, dec("103"));
    }

    #[test]
    fn test_category_total_includes_descendants() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![
            category("kitchen", None, Some("5")),
            category("cabinets", Some("kitchen"), None),
            category("bath", None, None),
        ];
        let items = vec![
            item("sink", "kitchen", LineItemType::Material, "1", "200", None),
            item("doors", "cabinets", LineItemType::Material, "4", "50", None),
            item("tile", "bath", LineItemType::Material, "10", "10", None),
        ];

        let kitchen = calculate_category_total("kitchen", &job, &categories, &items);
        assert_eq!(kitchen.category_id, "kitchen");
        assert_eq!(kitchen.subtotal, dec("400"));
        assert_eq!(kitchen.total, dec("460"));
        assert_eq!(kitchen.surcharge_total, dec("60"));

        let bath = calculate_category_total("bath", &job, &categories, &items);
        assert_eq!(bath.subtotal, dec("100"));
        assert_eq!(bath.total, dec("110"));
    }

    #[test]
    fn test_category_total_resolves_ancestors_above_target() {
        let job = job("0", SurchargeMode::Stacking);
        let categories = vec![
            category("kitchen", None, Some("5")),
            category("cabinets", Some("kitchen"), Some("2")),
        ];
        let items = vec![item("doors", "cabinets", LineItemType::Material, "1", "100", None)];

        let cabinets = calculate_category_total("cabinets", &job, &categories, &items);

        assert_eq!(cabinets.total, dec("107"));
    }

    #[test]
    fn test_category_total_of_unknown_category_is_zero() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![category("kitchen", None, None)];
        let items = vec![item("sink", "kitchen", LineItemType::Material, "1", "200", None)];

        let total = calculate_category_total("garage", &job, &categories, &items);

        assert_eq!(total, CategoryTotal::zero("garage"));
    }

    #[test]
    fn test_single_top_level_category_matches_job_total() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![category("cat-1", None, Some("5"))];
        let items = vec![
            item("item-1", "cat-1", LineItemType::Material, "10", "100", None),
            item("item-2", "cat-1", LineItemType::Labor, "5", "50", None),
        ];

        let job_total = calculate_job_total(&job, &categories, &items);
        let category_total = calculate_category_total("cat-1", &job, &categories, &items);

        assert_eq!(category_total.subtotal, job_total.subtotal);
        assert_eq!(category_total.total, job_total.grand_total);
        assert_eq!(category_total.surcharge_total, job_total.surcharge_total);
    }

    #[test]
    fn test_calculate_quote_matches_individual_entry_points() {
        let job = job("10", SurchargeMode::Stacking);
        let categories = vec![
            category("kitchen", None, Some("5")),
            category("cabinets", Some("kitchen"), Some("2")),
            category("bath", None, None),
        ];
        let items = vec![
            item("sink", "kitchen", LineItemType::Material, "1", "200", None),
            item("doors", "cabinets", LineItemType::Labor, "4", "50", Some("1")),
            item("tile", "bath", LineItemType::Equipment, "10", "10", None),
        ];

        let quote = calculate_quote(&job, &categories, &items);

        assert_eq!(quote.job_id, "job-1");
        assert_eq!(quote.totals, calculate_job_total(&job, &categories, &items));
        assert_eq!(quote.categories.len(), 3);
        for category_total in &quote.categories {
            assert_eq!(
                category_total,
                &calculate_category_total(&category_total.category_id, &job, &categories, &items)
            );
        }
        let priced: Vec<&str> = quote.line_items.iter().map(|p| p.line_item_id.as_str()).collect();
        assert_eq!(priced, ["sink", "doors", "tile"]);
        assert_eq!(quote.line_items[1].effective_surcharge, dec("18"));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let job = job("12.5", SurchargeMode::Stacking);
        let categories = vec![category("cat-1", None, Some("3.3"))];
        let items = vec![item("a", "cat-1", LineItemType::Material, "3", "33.33", None)];

        let first = calculate_job_total(&job, &categories, &items);
        let second = calculate_job_total(&job, &categories, &items);
        assert_eq!(first, second);

        let first = calculate_category_total("cat-1", &job, &categories, &items);
        let second = calculate_category_total("cat-1", &job, &categories, &items);
        assert_eq!(first, second);
    }
}
