//! Configuration module for Stockomatics.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: price history (Loader) and chart output (Chart). Holdings
//! come from a TOML file or the command line.

mod chart_config;
mod loader_config;
mod portfolio_file;

pub use chart_config::ChartEnvConfig;
pub use loader_config::LoaderEnvConfig;
pub use portfolio_file::{PortfolioFile, parse_holding};

use crate::infrastructure::csv_source::CsvPriceSource;
use anyhow::{Context, Result};
use std::env;

/// Source of configuration values, keyed by variable name
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub loader: LoaderEnvConfig,
    pub chart: ChartEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: &EnvLookup) -> Result<Self> {
        let loader = LoaderEnvConfig::from_lookup(lookup).context("Failed to load loader config")?;
        let chart = ChartEnvConfig::from_lookup(lookup).context("Failed to load chart config")?;

        Ok(Self { loader, chart })
    }

    /// CSV source matching the loader configuration
    pub fn price_source(&self) -> CsvPriceSource {
        CsvPriceSource::new(
            self.loader.data_dir.clone(),
            self.loader.market_cap_file.clone(),
            self.loader.asset_spec(),
            self.loader.market_spec(),
        )
    }
}
