//! CSV price history source
//!
//! Reads Yahoo Finance style exports (`Date,Open,High,Low,Close,Adj Close,Volume`,
//! oldest row first) for portfolio assets and a two-column `Date,Total` file,
//! newest row first, for the total crypto market capitalization.
//!
//! Both loaders share one contract: skip the header, drop rows containing the
//! missing-value marker, keep the most recent `window` valid rows and return
//! them oldest first.

use crate::domain::errors::LoaderError;
use crate::domain::ports::PriceHistorySource;
use crate::domain::series::{DailyClose, PriceSeries};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Row order of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileOrder {
    /// Chronological, newest row last (Yahoo Finance exports)
    #[default]
    OldestFirst,
    NewestFirst,
}

impl FromStr for FileOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "oldest-first" => Ok(FileOrder::OldestFirst),
            "newest-first" => Ok(FileOrder::NewestFirst),
            _ => anyhow::bail!(
                "Invalid file order: {}. Must be 'oldest-first' or 'newest-first'",
                s
            ),
        }
    }
}

/// How to read one kind of file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSpec {
    /// Maximum number of most recent valid rows to keep
    pub window: usize,
    /// 0-based index of the value column
    pub column: usize,
    pub missing_marker: String,
    pub order: FileOrder,
}

impl ReadSpec {
    /// Asset price files: close at column 4, `null` marks missing days.
    pub fn asset_closes(window: usize) -> Self {
        Self {
            window,
            column: 4,
            missing_marker: "null".to_string(),
            order: FileOrder::OldestFirst,
        }
    }

    /// Market-cap file: total at column 1, newest row first.
    pub fn market_caps(window: usize) -> Self {
        Self {
            column: 1,
            order: FileOrder::NewestFirst,
            ..Self::asset_closes(window)
        }
    }
}

/// Reads the most recent valid rows of a CSV stream.
///
/// `path` is only used to label errors.
pub fn read_recent<R: Read>(
    reader: R,
    path: &Path,
    label: &str,
    spec: &ReadSpec,
) -> Result<PriceSeries, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record.map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })?);
    }

    let newest_first: Box<dyn Iterator<Item = &csv::StringRecord> + '_> = match spec.order {
        FileOrder::OldestFirst => Box::new(records.iter().rev()),
        FileOrder::NewestFirst => Box::new(records.iter()),
    };

    let mut kept = Vec::with_capacity(spec.window);
    let mut skipped = 0usize;

    for record in newest_first {
        if kept.len() >= spec.window {
            break;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().any(|field| field == spec.missing_marker) {
            debug!("Skipping {} line {}: missing value", path.display(), line);
            skipped += 1;
            continue;
        }

        let field = record.get(spec.column).ok_or_else(|| LoaderError::MissingColumn {
            path: path.to_path_buf(),
            line,
            column: spec.column,
        })?;

        let value = parse_decimal(field).ok_or_else(|| LoaderError::InvalidNumber {
            path: path.to_path_buf(),
            line,
            column: spec.column,
            value: field.to_string(),
        })?;

        kept.push(DailyClose::new(record.get(0).unwrap_or_default(), value));
    }

    kept.reverse();

    if kept.len() < spec.window {
        warn!(
            "{} has {} valid rows for a {}-day window ({} skipped)",
            path.display(),
            kept.len(),
            spec.window,
            skipped
        );
    }

    Ok(PriceSeries::new(label, kept))
}

/// Accepts plain decimals and scientific notation (`1.94e12`).
fn parse_decimal(field: &str) -> Option<Decimal> {
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Price history read from `<data_dir>/<asset>.csv` and the market-cap file.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    data_dir: PathBuf,
    market_file: PathBuf,
    asset_spec: ReadSpec,
    market_spec: ReadSpec,
}

impl CsvPriceSource {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        market_file: impl Into<PathBuf>,
        asset_spec: ReadSpec,
        market_spec: ReadSpec,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            market_file: market_file.into(),
            asset_spec,
            market_spec,
        }
    }

    /// Default layout: `<data_dir>/<asset>.csv` and `<data_dir>/total.csv`.
    pub fn with_window(data_dir: impl Into<PathBuf>, window: usize) -> Self {
        Self::new(
            data_dir,
            "total.csv",
            ReadSpec::asset_closes(window),
            ReadSpec::market_caps(window),
        )
    }

    pub fn asset_path(&self, asset: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", asset))
    }

    /// Relative market files resolve against the data directory.
    pub fn market_path(&self) -> PathBuf {
        self.data_dir.join(&self.market_file)
    }

    fn read_file(&self, path: &Path, label: &str, spec: &ReadSpec) -> Result<PriceSeries, LoaderError> {
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let series = read_recent(file, path, label, spec)?;
        info!("Loaded {} days from {}", series.len(), path.display());
        Ok(series)
    }
}

impl PriceHistorySource for CsvPriceSource {
    fn load_closes(&self, asset: &str) -> Result<PriceSeries, LoaderError> {
        self.read_file(&self.asset_path(asset), asset, &self.asset_spec)
    }

    fn load_market_caps(&self) -> Result<PriceSeries, LoaderError> {
        self.read_file(&self.market_path(), "total", &self.market_spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BTC_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2021-03-01,45159.50,49784.01,45115.09,49631.24,49631.24,53891300352
2021-03-02,49612.10,50127.51,47228.84,48378.99,48378.99,47530897720
2021-03-03,48415.82,52535.14,48274.32,50538.24,50538.24,53220811975
2021-03-04,50522.30,51735.09,47656.93,48561.17,48561.17,52343816680
2021-03-05,48527.03,49396.43,46542.52,48927.30,48927.30,48625928883
";

    fn read(csv: &str, spec: &ReadSpec) -> Result<PriceSeries, LoaderError> {
        read_recent(csv.as_bytes(), Path::new("btc.csv"), "btc", spec)
    }

    #[test]
    fn test_keeps_most_recent_window_oldest_first() {
        let series = read(BTC_CSV, &ReadSpec::asset_closes(3)).unwrap();

        assert_eq!(
            series.values(),
            vec![dec!(50538.24), dec!(48561.17), dec!(48927.30)]
        );
        assert_eq!(series.first().unwrap().date, "2021-03-03");
        assert_eq!(series.closes()[2].date, "2021-03-05");
        assert_eq!(series.label(), "btc");
    }

    #[test]
    fn test_short_file_yields_short_series() {
        let series = read(BTC_CSV, &ReadSpec::asset_closes(10)).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.first().unwrap().value, dec!(49631.24));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let series = read("Date,Open,High,Low,Close,Adj Close,Volume\n", &ReadSpec::asset_closes(10)).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_missing_rows_do_not_count_toward_window() {
        let csv = "\
Date,Open,High,Low,Close,Adj Close,Volume
2021-03-01,1,1,1,100,100,10
2021-03-02,1,1,1,110,110,10
2021-03-03,null,null,null,null,null,null
2021-03-04,1,1,1,121,121,10
";
        let series = read(csv, &ReadSpec::asset_closes(3)).unwrap();

        assert_eq!(series.values(), vec![dec!(100), dec!(110), dec!(121)]);
        let dates: Vec<&str> = series.closes().iter().map(|c| c.date.as_str()).collect();
        assert_eq!(dates, vec!["2021-03-01", "2021-03-02", "2021-03-04"]);
    }

    #[test]
    fn test_invalid_number_is_fatal() {
        let csv = "\
Date,Open,High,Low,Close,Adj Close,Volume
2021-03-01,1,1,1,abc,1,10
";
        match read(csv, &ReadSpec::asset_closes(10)) {
            Err(LoaderError::InvalidNumber { line, column, value, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 4);
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_reports_missing_column() {
        let csv = "Date,Total\n2021-03-01,1.5e12\n";
        let result = read(csv, &ReadSpec::asset_closes(10));
        assert!(matches!(
            result,
            Err(LoaderError::MissingColumn { column: 4, .. })
        ));
    }

    #[test]
    fn test_market_caps_accept_scientific_notation() {
        let csv = "Date,Total\n2021-03-02,1600000000000\n2021-03-01,1.5e12\n";
        let series = read(csv, &ReadSpec::market_caps(10)).unwrap();
        assert_eq!(
            series.values(),
            vec![dec!(1500000000000), dec!(1600000000000)]
        );
    }

    #[test]
    fn test_market_caps_are_read_newest_first() {
        let csv = "Date,Total\n2021-03-03,3\n2021-03-02,null\n2021-03-01,1\n2021-02-28,0.5\n";

        let series = read(csv, &ReadSpec::market_caps(2)).unwrap();
        assert_eq!(series.values(), vec![dec!(1), dec!(3)]);
        assert_eq!(series.closes()[0].date, "2021-03-01");
    }

    #[test]
    fn test_oldest_first_market_file_override() {
        let csv = "Date,Total\n2021-03-01,1\n2021-03-02,2\n2021-03-03,3\n";
        let spec = ReadSpec {
            order: FileOrder::OldestFirst,
            ..ReadSpec::market_caps(2)
        };

        let series = read(csv, &spec).unwrap();
        assert_eq!(series.values(), vec![dec!(2), dec!(3)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvPriceSource::with_window("does/not/exist", 10);
        match source.load_closes("btc") {
            Err(LoaderError::Io { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist").join("btc.csv"));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_order_parsing() {
        assert_eq!("newest-first".parse::<FileOrder>().unwrap(), FileOrder::NewestFirst);
        assert_eq!("OLDEST_FIRST".parse::<FileOrder>().unwrap(), FileOrder::OldestFirst);
        assert!("sideways".parse::<FileOrder>().is_err());
    }
}
