use crate::domain::chart::ComparisonChart;
use crate::domain::errors::RenderError;
use crate::domain::ports::{ChartRenderer, RenderOutcome};
use tracing::warn;

/// Tries `primary` first and hands the chart to `fallback` if it fails,
/// e.g. a native window on a machine without a display.
pub struct FallbackChartRenderer {
    primary: Box<dyn ChartRenderer>,
    fallback: Box<dyn ChartRenderer>,
}

impl FallbackChartRenderer {
    pub fn new(primary: Box<dyn ChartRenderer>, fallback: Box<dyn ChartRenderer>) -> Self {
        Self { primary, fallback }
    }
}

impl ChartRenderer for FallbackChartRenderer {
    fn render(&self, chart: &ComparisonChart) -> Result<RenderOutcome, RenderError> {
        match self.primary.render(chart) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!("Primary chart renderer failed ({}), using fallback", e);
                self.fallback.render(chart)
            }
        }
    }
}
