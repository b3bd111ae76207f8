//! Price history configuration parsing from environment variables.
//!
//! This module handles where the CSV files live and how they are read.

use super::EnvLookup;
use crate::infrastructure::csv_source::{FileOrder, ReadSpec};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Price history environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderEnvConfig {
    pub data_dir: PathBuf,
    pub window_days: usize,
    pub missing_value_marker: String,
    pub close_column: usize,
    pub market_cap_file: PathBuf,
    pub market_cap_column: usize,
    pub market_file_order: FileOrder,
}

impl Default for LoaderEnvConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            window_days: 10,
            missing_value_marker: "null".to_string(),
            close_column: 4,
            market_cap_file: PathBuf::from("total.csv"),
            market_cap_column: 1,
            market_file_order: FileOrder::NewestFirst,
        }
    }
}

impl LoaderEnvConfig {
    pub fn from_lookup(lookup: &EnvLookup) -> Result<Self> {
        let defaults = Self::default();

        let window_days = Self::parse_usize(lookup, "WINDOW_DAYS", defaults.window_days)?;
        if window_days == 0 {
            anyhow::bail!("WINDOW_DAYS must be at least 1");
        }

        let market_file_order = match lookup("MARKET_FILE_ORDER") {
            Some(order) => {
                FileOrder::from_str(&order).context("Failed to parse MARKET_FILE_ORDER")?
            }
            None => defaults.market_file_order,
        };

        Ok(Self {
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            window_days,
            missing_value_marker: lookup("MISSING_VALUE_MARKER")
                .unwrap_or(defaults.missing_value_marker),
            close_column: Self::parse_usize(lookup, "CLOSE_COLUMN", defaults.close_column)?,
            market_cap_file: lookup("MARKET_CAP_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.market_cap_file),
            market_cap_column: Self::parse_usize(
                lookup,
                "MARKET_CAP_COLUMN",
                defaults.market_cap_column,
            )?,
            market_file_order,
        })
    }

    pub fn asset_spec(&self) -> ReadSpec {
        ReadSpec {
            window: self.window_days,
            column: self.close_column,
            missing_marker: self.missing_value_marker.clone(),
            order: FileOrder::OldestFirst,
        }
    }

    pub fn market_spec(&self) -> ReadSpec {
        ReadSpec {
            window: self.window_days,
            column: self.market_cap_column,
            missing_marker: self.missing_value_marker.clone(),
            order: self.market_file_order,
        }
    }

    fn parse_usize(lookup: &EnvLookup, key: &str, default: usize) -> Result<usize> {
        lookup(key)
            .unwrap_or_else(|| default.to_string())
            .trim()
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }
}
