//! Surcharge resolution and totals aggregation.
//!
//! This module contains the pure calculation core of the quote engine:
//! resolving the effective surcharge of a line item under the stacking and
//! override policies, pricing items, indexing the category tree, and rolling
//! item prices up into category and job totals.

mod category_tree;
mod surcharge;
mod totals;

pub use category_tree::CategoryTree;
pub use surcharge::{
    PriceOverflow, checked_final_price, effective_surcharge, final_price, override_surcharge,
    price_line_item, stacking_surcharge,
};
pub use totals::{calculate_category_total, calculate_job_total, calculate_quote};
