//! In-memory price history
//!
//! Serves fixed series through the same [`PriceHistorySource`] port as the CSV
//! files, applying the same most-recent-window rule. Useful for tests and for
//! running the pipeline on synthetic data.

use crate::domain::errors::LoaderError;
use crate::domain::ports::PriceHistorySource;
use crate::domain::series::PriceSeries;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InMemoryPriceSource {
    window: usize,
    assets: HashMap<String, PriceSeries>,
    market_caps: PriceSeries,
}

impl InMemoryPriceSource {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            assets: HashMap::new(),
            market_caps: PriceSeries::from_values("total", &[]),
        }
    }

    /// Adds undated closes for `asset`, oldest first.
    pub fn with_asset(mut self, asset: &str, closes: &[Decimal]) -> Self {
        self.assets
            .insert(asset.to_string(), PriceSeries::from_values(asset, closes));
        self
    }

    /// Sets undated market caps, oldest first.
    pub fn with_market_caps(mut self, caps: &[Decimal]) -> Self {
        self.market_caps = PriceSeries::from_values("total", caps);
        self
    }

    fn recent(&self, series: &PriceSeries) -> PriceSeries {
        let closes = series.closes();
        let start = closes.len().saturating_sub(self.window);
        PriceSeries::new(series.label(), closes[start..].to_vec())
    }
}

impl PriceHistorySource for InMemoryPriceSource {
    fn load_closes(&self, asset: &str) -> Result<PriceSeries, LoaderError> {
        let series = self.assets.get(asset).ok_or_else(|| LoaderError::Io {
            path: PathBuf::from(format!("memory://{}", asset)),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "asset not registered"),
        })?;
        Ok(self.recent(series))
    }

    fn load_market_caps(&self) -> Result<PriceSeries, LoaderError> {
        Ok(self.recent(&self.market_caps))
    }
}
