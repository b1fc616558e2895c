//! Core data models for the quote engine.
//!
//! Entities reference each other by identifier only; the calculation layer
//! builds whatever lookup indices it needs at call time.

mod category;
mod job;
mod line_item;
mod totals;

pub use category::Category;
pub use job::{Job, Settings, SurchargeMode};
pub use line_item::{CommonUnits, LineItem, LineItemType};
pub use totals::{CategoryTotal, JobTotal, LineItemPricing, QuoteResult};
