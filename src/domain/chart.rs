//! Renderer-agnostic description of the comparison chart.
//!
//! Both the interactive window and the PNG writer draw from a
//! [`ComparisonChart`], so the pipeline can be tested without a display.

use crate::domain::series::PerformanceSeries;

pub const CHART_TITLE: &str = "Stockomatics Portfolio and Total Crypto Market Performance";
pub const X_AXIS_LABEL: &str = "Days";
pub const Y_AXIS_LABEL: &str = "Cumulative Performance (%)";
pub const PORTFOLIO_LABEL: &str = "Stockomatics Portfolio";
pub const MARKET_LABEL: &str = "Crypto Market Capitalization";

/// Plain RGB colour, converted by each backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(220, 38, 38);
    pub const BLUE: Rgb = Rgb(37, 99, 235);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: Rgb,
    /// `[day, pct]` pairs, days numbered from 1
    pub points: Vec<[f64; 2]>,
}

impl ChartSeries {
    pub fn from_performance(series: &PerformanceSeries, color: Rgb) -> Self {
        Self {
            label: series.label().to_string(),
            color,
            points: series.plot_points(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

impl ComparisonChart {
    /// Portfolio in red, market in blue. Each series keeps its own length.
    pub fn from_performance(portfolio: &PerformanceSeries, market: &PerformanceSeries) -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            series: vec![
                ChartSeries::from_performance(portfolio, Rgb::RED),
                ChartSeries::from_performance(market, Rgb::BLUE),
            ],
        }
    }

    /// Number of days on the x axis: the longest series.
    pub fn day_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).max().unwrap_or(0)
    }

    /// X axis bounds with half a day of margin on each side.
    pub fn x_range(&self) -> (f64, f64) {
        (0.5, self.day_count().max(1) as f64 + 0.5)
    }

    /// Y axis bounds padded by 10% of the value range.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self.series.iter().flat_map(|s| s.points.iter().map(|p| p[1]));
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if !min.is_finite() || !max.is_finite() {
            return (-1.0, 1.0);
        }

        let span = (max - min).max(1.0);
        let padding = span * 0.1;
        (min - padding, max + padding)
    }
}
