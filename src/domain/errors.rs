use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading price history files
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid number '{value}' in {path} (line {line}, column {column})")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: usize,
        value: String,
    },

    #[error("Row at line {line} of {path} has no column {column}")]
    MissingColumn {
        path: PathBuf,
        line: u64,
        column: usize,
    },
}

/// Errors related to portfolio holdings and their aggregation
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Asset identifier cannot be empty")]
    EmptyAssetId,

    #[error("Asset {asset} is listed more than once")]
    DuplicateAsset { asset: String },

    #[error("Negative quantity for {asset}: {quantity}")]
    NegativeQuantity { asset: String, quantity: Decimal },

    #[error("Invalid quantity for {asset}: '{value}'")]
    InvalidQuantity { asset: String, value: String },

    #[error("No price series loaded for {asset}")]
    MissingPrices { asset: String },

    #[error("Price series for {asset} has {actual} days, expected {expected}")]
    MisalignedSeries {
        asset: String,
        expected: usize,
        actual: usize,
    },

    #[error("Price series for {asset} is on {actual} at day {day}, expected {expected}")]
    MisalignedDates {
        asset: String,
        day: usize,
        expected: String,
        actual: String,
    },

    #[error("Portfolio value overflowed while adding {asset}")]
    Overflow { asset: String },
}

/// Errors related to percentage performance conversion
#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("Cannot compute performance of an empty series: {label}")]
    EmptySeries { label: String },

    #[error("Baseline of {label} is zero, performance is undefined")]
    ZeroBaseline { label: String },

    #[error("Performance of {label} is out of decimal range")]
    Overflow { label: String },
}

/// Errors raised by chart renderers
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Chart backend error: {0}")]
    Backend(String),

    #[error("Chart output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a full analysis run, surfaced unchanged from the failing stage
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error(transparent)]
    Performance(#[from] PerformanceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
