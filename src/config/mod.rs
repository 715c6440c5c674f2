//! Configuration loading and management for the scheduling engine.
//!
//! This module loads labor-law limits and business constants from YAML
//! files, with Colombian defaults available through `Default`.
//!
//! # Example
//!
//! ```no_run
//! use schedule_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/colombia").unwrap();
//! println!("Budget: {} {}", config.business().weekly_budget, config.business().currency);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BusinessRules, EngineConfig, HARD_MIN_REST_HOURS, LaborRules, OVERTIME_ERROR_MARGIN_HOURS,
    Surcharges,
};
