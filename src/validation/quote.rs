//! Structural validation of a complete job snapshot.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::calculation::{CategoryTree, PriceOverflow, checked_final_price};
use crate::models::{Category, Job, LineItem};

use super::{
    ValidationError, check_name, check_quantity, check_surcharge, check_unit_price,
    validate_category_depth,
};

/// Validates a job, its categories and its line items before pricing.
///
/// Besides the per-field rules this checks the category tree invariants the
/// engine relies on: every category and every parent belongs to the job,
/// parents exist, the hierarchy is acyclic and no deeper than
/// [`super::MAX_CATEGORY_DEPTH`], and every line item points at a known
/// category. Fields are reported as indexed paths such as
/// `categories[1].parent_id`.
pub fn validate_quote(
    job: &Job,
    categories: &[Category],
    line_items: &[LineItem],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let tree = CategoryTree::new(categories);

    check_surcharge("job.surcharge_percent", Some(job.surcharge_percent), &mut errors);

    let mut seen = HashSet::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        let field = |name: &str| format!("categories[{}].{}", index, name);

        if !seen.insert(category.id.as_str()) {
            errors.push(ValidationError::new(field("id"), "Duplicate category id"));
        }
        if category.job_id != job.id {
            errors.push(ValidationError::new(
                field("job_id"),
                "Category belongs to a different job",
            ));
        }
        check_name(&field("name"), &category.name, &mut errors);
        check_surcharge(&field("surcharge_percent"), category.surcharge_percent, &mut errors);

        if let Some(error) = check_parent(category, &tree) {
            errors.push(ValidationError::new(field("parent_id"), error));
        }
    }

    let mut seen = HashSet::with_capacity(line_items.len());
    let mut running_total = Some(Decimal::ZERO);
    for (index, item) in line_items.iter().enumerate() {
        let field = |name: &str| format!("line_items[{}].{}", index, name);

        if !seen.insert(item.id.as_str()) {
            errors.push(ValidationError::new(field("id"), "Duplicate line item id"));
        }
        if !tree.contains(&item.category_id) {
            errors.push(ValidationError::new(field("category_id"), "Category not found"));
        }
        check_name(&field("name"), &item.name, &mut errors);
        check_quantity(&field("quantity"), item.quantity, &mut errors);
        if item.unit.trim().is_empty() {
            errors.push(ValidationError::new(field("unit"), "Unit is required"));
        }
        check_unit_price(&field("unit_price"), item.unit_price, &mut errors);
        check_surcharge(&field("surcharge_percent"), item.surcharge_percent, &mut errors);

        match checked_final_price(item, job, &tree.chain(&item.category_id)) {
            Ok(price) => {
                // Once one sum overflows, later items are not reported again
                if let Some(total) = running_total {
                    running_total = total.checked_add(price);
                    if running_total.is_none() {
                        errors.push(ValidationError::new(
                            field("unit_price"),
                            "Quote total is too large",
                        ));
                    }
                }
            }
            Err(overflow) => errors.push(overflow_error(overflow, &field)),
        }
    }

    errors
}

fn overflow_error(overflow: PriceOverflow, field: &dyn Fn(&str) -> String) -> ValidationError {
    match overflow {
        PriceOverflow::BasePrice => ValidationError::new(
            field("quantity"),
            "Quantity multiplied by unit price is too large",
        ),
        PriceOverflow::Surcharge => {
            ValidationError::new(field("surcharge_percent"), "Combined surcharge is too large")
        }
        PriceOverflow::FinalPrice => ValidationError::new(
            field("unit_price"),
            "Price including surcharge is too large",
        ),
    }
}

fn check_parent(category: &Category, tree: &CategoryTree<'_>) -> Option<String> {
    let parent_id = category.parent_id.as_deref()?;

    if parent_id == category.id {
        return Some("Category cannot be its own parent".to_string());
    }
    let Some(parent) = tree.get(parent_id) else {
        return Some("Parent category not found".to_string());
    };
    if parent.job_id != category.job_id {
        return Some("Parent category belongs to a different job".to_string());
    }
    if tree.has_cycle(&category.id) {
        return Some("Category hierarchy contains a cycle".to_string());
    }
    validate_category_depth(tree.depth(parent_id)).map(|e| e.message)
}
