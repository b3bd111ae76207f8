//! Chart output configuration parsing from environment variables.

use super::EnvLookup;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Chart environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEnvConfig {
    /// Write a PNG here instead of (or when unable to) open a window
    pub output: Option<PathBuf>,
    /// Never open a window
    pub headless: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartEnvConfig {
    fn default() -> Self {
        Self {
            output: None,
            headless: false,
            width: 1200,
            height: 800,
        }
    }
}

impl ChartEnvConfig {
    /// PNG written when no explicit output is configured and no window can be shown.
    pub const FALLBACK_OUTPUT: &'static str = "performance.png";

    pub fn from_lookup(lookup: &EnvLookup) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            output: lookup("CHART_OUTPUT")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            headless: lookup("CHART_HEADLESS")
                .map(|v| v.parse::<bool>())
                .transpose()
                .context("Failed to parse CHART_HEADLESS")?
                .unwrap_or(defaults.headless),
            width: Self::parse_u32(lookup, "CHART_WIDTH", defaults.width)?,
            height: Self::parse_u32(lookup, "CHART_HEIGHT", defaults.height)?,
        })
    }

    /// Output path for the PNG renderer.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::FALLBACK_OUTPUT))
    }

    fn parse_u32(lookup: &EnvLookup, key: &str, default: u32) -> Result<u32> {
        lookup(key)
            .unwrap_or_else(|| default.to_string())
            .trim()
            .parse::<u32>()
            .context(format!("Failed to parse {}", key))
    }
}
