//! Surcharge resolution and totals engine for contractor quotes.
//!
//! A job is organised into a tree of categories (at most three levels deep)
//! holding priced line items. Surcharge percentages may be declared on the
//! job, on any category and on any line item; this crate resolves the
//! effective surcharge of each item under the job's mode (stacking or
//! override) and aggregates prices into job and category totals.
//!
//! # Example
//!
//! ```
//! use quote_engine::calculation::calculate_job_total;
//! use quote_engine::models::{Category, Job, LineItem, LineItemType, Settings};
//! use rust_decimal::Decimal;
//!
//! let mut job = Job::from_settings("Kitchen", &Settings::default());
//! job.surcharge_percent = Decimal::from(10);
//!
//! let category = Category {
//!     id: "cabinets".to_string(),
//!     job_id: job.id.clone(),
//!     parent_id: None,
//!     name: "Cabinets".to_string(),
//!     surcharge_percent: Some(Decimal::from(5)),
//!     sort_order: 0,
//! };
//! let item = LineItem {
//!     id: "base".to_string(),
//!     category_id: "cabinets".to_string(),
//!     item_type: LineItemType::Material,
//!     name: "Base cabinet".to_string(),
//!     description: None,
//!     quantity: Decimal::from(2),
//!     unit: "ea".to_string(),
//!     unit_price: Decimal::from(100),
//!     surcharge_percent: None,
//!     sort_order: 0,
//! };
//!
//! let total = calculate_job_total(&job, &[category], &[item]);
//! assert_eq!(total.grand_total, Decimal::from(230));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;
