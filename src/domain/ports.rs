use crate::domain::chart::ComparisonChart;
use crate::domain::errors::{LoaderError, RenderError};
use crate::domain::series::PriceSeries;
use std::path::PathBuf;

/// Historical daily values for portfolio assets and the market benchmark.
///
/// Implementations return at most their configured window of most recent
/// days, oldest first.
pub trait PriceHistorySource {
    fn load_closes(&self, asset: &str) -> Result<PriceSeries, LoaderError>;
    fn load_market_caps(&self) -> Result<PriceSeries, LoaderError>;
}

/// What a renderer did with the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Shown in a window that the viewer has since closed
    Displayed,
    /// Written to an image file
    Written(PathBuf),
}

pub trait ChartRenderer {
    fn render(&self, chart: &ComparisonChart) -> Result<RenderOutcome, RenderError>;
}
