//! Configuration loading for the quote engine.
//!
//! Application settings and the common unit lists are read from YAML files
//! in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use quote_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default mode: {}", config.settings().default_surcharge_mode);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{QuoteConfig, UnitsFile};
