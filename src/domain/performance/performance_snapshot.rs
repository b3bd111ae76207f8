use crate::domain::series::PerformanceSeries;
use rust_decimal::Decimal;

/// End-of-window comparison between the portfolio and the market benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSnapshot {
    pub portfolio_label: String,
    pub market_label: String,
    /// Cumulative portfolio performance at the last loaded day (%)
    pub portfolio_pct: Decimal,
    /// Cumulative market performance at the last loaded day (%)
    pub market_pct: Decimal,
    /// Portfolio minus market, in percentage points
    pub spread_pct: Decimal,
    pub portfolio_days: usize,
    pub market_days: usize,
}

impl PerformanceSnapshot {
    pub fn compare(portfolio: &PerformanceSeries, market: &PerformanceSeries) -> Self {
        let portfolio_pct = portfolio.cumulative().unwrap_or(Decimal::ZERO);
        let market_pct = market.cumulative().unwrap_or(Decimal::ZERO);

        Self {
            portfolio_label: portfolio.label().to_string(),
            market_label: market.label().to_string(),
            portfolio_pct,
            market_pct,
            spread_pct: portfolio_pct.saturating_sub(market_pct),
            portfolio_days: portfolio.len(),
            market_days: market.len(),
        }
    }

    pub fn outperformed(&self) -> bool {
        self.spread_pct > Decimal::ZERO
    }

    /// True when both series span the same number of days.
    pub fn windows_match(&self) -> bool {
        self.portfolio_days == self.market_days
    }
}
