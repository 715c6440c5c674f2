//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheduling
//! rules from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

use super::types::{BusinessRules, EngineConfig, LaborRules};

/// Loads and provides access to scheduling configuration.
///
/// # Directory Structure
///
/// ```text
/// config/colombia/
/// ├── labor.yaml     # Hour limits, rest rules, surcharges
/// └── business.yaml  # Budget, staffing minimum, cache settings
/// ```
///
/// # Example
///
/// ```no_run
/// use schedule_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/colombia").unwrap();
/// println!("Weekly ceiling: {}h", loader.labor().max_weekly_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    /// - A value is out of range (see [`ConfigLoader::from_config`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let labor = Self::load_yaml::<LaborRules>(&path.join("labor.yaml"))?;
        let business = Self::load_yaml::<BusinessRules>(&path.join("business.yaml"))?;

        let loader = Self::from_config(EngineConfig { labor, business })?;
        tracing::debug!(path = %path.display(), "Loaded scheduling configuration");
        Ok(loader)
    }

    /// Wraps an in-memory configuration after checking its values.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::check(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check(config: &EngineConfig) -> EngineResult<()> {
        let labor = &config.labor;
        let positive_hours = [
            ("max_weekly_hours", labor.max_weekly_hours),
            ("max_consecutive_hours", labor.max_consecutive_hours),
            ("min_shift_hours", labor.min_shift_hours),
            (
                "min_rest_between_shifts_hours",
                labor.min_rest_between_shifts_hours,
            ),
        ];
        for (field, value) in positive_hours {
            if value <= Decimal::ZERO {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }
        if labor.max_consecutive_work_days == 0 {
            return Err(invalid("max_consecutive_work_days", "must be at least 1"));
        }

        let business = &config.business;
        if business.weekly_budget < Decimal::ZERO {
            return Err(invalid("weekly_budget", "cannot be negative"));
        }
        let threshold = business.budget_warning_threshold;
        if threshold <= Decimal::ZERO || threshold > Decimal::ONE_HUNDRED {
            return Err(invalid(
                "budget_warning_threshold",
                format!("must be within (0, 100], got {}", threshold),
            ));
        }
        if business.min_staff_per_shift == 0 {
            return Err(invalid("min_staff_per_shift", "must be at least 1"));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the labor-law limits.
    pub fn labor(&self) -> &LaborRules {
        &self.config.labor
    }

    /// Returns the business constants.
    pub fn business(&self) -> &BusinessRules {
        &self.config.business
    }

    /// Time-to-live for cached query results.
    pub fn query_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.config.business.query_cache_ttl_seconds)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
