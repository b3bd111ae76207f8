use crate::domain::chart::{ComparisonChart, MARKET_LABEL, PORTFOLIO_LABEL};
use crate::domain::errors::{AnalysisError, LoaderError};
use crate::domain::performance::{PerformanceSnapshot, to_performance};
use crate::domain::portfolio::Portfolio;
use crate::domain::ports::{ChartRenderer, PriceHistorySource, RenderOutcome};
use crate::domain::series::{PerformanceSeries, PriceSeries};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Everything one analysis run produced. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub portfolio: Portfolio,
    pub asset_prices: BTreeMap<String, PriceSeries>,
    pub portfolio_values: PriceSeries,
    pub portfolio_performance: PerformanceSeries,
    pub market_caps: PriceSeries,
    pub market_performance: PerformanceSeries,
    pub snapshot: PerformanceSnapshot,
}

impl AnalysisReport {
    pub fn chart(&self) -> ComparisonChart {
        ComparisonChart::from_performance(&self.portfolio_performance, &self.market_performance)
    }
}

/// Runs the portfolio vs. market pipeline against one price source.
pub struct PerformanceAnalysis<'a> {
    portfolio: &'a Portfolio,
    source: &'a dyn PriceHistorySource,
}

impl<'a> PerformanceAnalysis<'a> {
    pub fn new(portfolio: &'a Portfolio, source: &'a dyn PriceHistorySource) -> Self {
        Self { portfolio, source }
    }

    /// Loads the recent closes of every held asset.
    pub fn load_prices(&self) -> Result<BTreeMap<String, PriceSeries>, LoaderError> {
        let mut prices = BTreeMap::new();
        for asset in self.portfolio.assets() {
            let series = self.source.load_closes(asset)?;
            prices.insert(asset.to_string(), series);
        }
        Ok(prices)
    }

    /// Loads the total market capitalization, labelled for the chart.
    pub fn load_market_caps(&self) -> Result<PriceSeries, LoaderError> {
        Ok(self.source.load_market_caps()?.with_label(MARKET_LABEL))
    }

    /// Load, aggregate and convert. Stops at the first failing stage.
    pub fn run(&self) -> Result<AnalysisReport, AnalysisError> {
        info!("Loading prices for {} assets", self.portfolio.len());
        let asset_prices = self.load_prices()?;

        let portfolio_values = self.portfolio.valuation(&asset_prices, PORTFOLIO_LABEL)?;
        info!("Portfolio valued over {} days", portfolio_values.len());

        let portfolio_performance = to_performance(&portfolio_values)?;

        let market_caps = self.load_market_caps()?;
        let market_performance = to_performance(&market_caps)?;
        info!("Market benchmark covers {} days", market_caps.len());

        let snapshot = PerformanceSnapshot::compare(&portfolio_performance, &market_performance);
        if !snapshot.windows_match() {
            warn!(
                "Portfolio covers {} days but market covers {}",
                snapshot.portfolio_days, snapshot.market_days
            );
        }

        Ok(AnalysisReport {
            portfolio: self.portfolio.clone(),
            asset_prices,
            portfolio_values,
            portfolio_performance,
            market_caps,
            market_performance,
            snapshot,
        })
    }
}

/// Runs the full pipeline and hands the comparison chart to `renderer`.
pub fn launch(
    portfolio: &Portfolio,
    source: &dyn PriceHistorySource,
    renderer: &dyn ChartRenderer,
) -> Result<(AnalysisReport, RenderOutcome), AnalysisError> {
    let report = PerformanceAnalysis::new(portfolio, source).run()?;
    let outcome = renderer.render(&report.chart())?;
    Ok((report, outcome))
}
