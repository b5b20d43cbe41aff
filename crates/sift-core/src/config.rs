//! Configuration loading.
//!
//! Precedence:
//! 1. Environment variables (`SIFT_LOW_WATER_MARK`, `SIFT_PAGE_SIZE`)
//! 2. Config file (TOML)
//! 3. Defaults
//!
//! Every field is optional; an empty file yields the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Result, SiftError};
use crate::queue::{DEFAULT_LOW_WATER_MARK, ReplenishmentPolicy};

pub const ENV_LOW_WATER_MARK: &str = "SIFT_LOW_WATER_MARK";
pub const ENV_PAGE_SIZE: &str = "SIFT_PAGE_SIZE";

/// Upper bound for `source.catalog_size`; the source materializes the whole
/// catalog for every query.
pub const MAX_CATALOG_SIZE: u64 = 1_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiftConfig {
    pub replenish: ReplenishConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplenishConfig {
    /// Queue size below which `fetch-more` is dispatched.
    pub low_water_mark: usize,
}

impl Default for ReplenishConfig {
    fn default() -> Self {
        Self {
            low_water_mark: DEFAULT_LOW_WATER_MARK,
        }
    }
}

/// Settings for the in-memory candidate source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub page_size: usize,
    pub catalog_size: u64,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            catalog_size: 500,
            seed: None,
        }
    }
}

impl SiftConfig {
    /// Load from `path` (if given), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    SiftError::config(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides from `lookup` (environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup(ENV_LOW_WATER_MARK) {
            self.replenish.low_water_mark = parse_usize(ENV_LOW_WATER_MARK, &v)?;
        }
        if let Some(v) = lookup(ENV_PAGE_SIZE) {
            self.source.page_size = parse_usize(ENV_PAGE_SIZE, &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.replenish.low_water_mark == 0 {
            return Err(SiftError::config(
                "replenish.low_water_mark must be at least 1",
            ));
        }
        if self.source.page_size == 0 {
            return Err(SiftError::config("source.page_size must be at least 1"));
        }
        if !(1..=MAX_CATALOG_SIZE).contains(&self.source.catalog_size) {
            return Err(SiftError::config(format!(
                "source.catalog_size must be between 1 and {MAX_CATALOG_SIZE}, got {}",
                self.source.catalog_size
            )));
        }
        Ok(())
    }

    pub fn policy(&self) -> ReplenishmentPolicy {
        ReplenishmentPolicy::new(self.replenish.low_water_mark)
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| SiftError::config(format!("{key}: expected a number, got {value:?}")))
}
