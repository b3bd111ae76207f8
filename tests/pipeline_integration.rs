use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use stockomatics::application::{PerformanceAnalysis, RunSummary, launch};
use stockomatics::config::{Config, PortfolioFile};
use stockomatics::domain::chart::{ComparisonChart, MARKET_LABEL, PORTFOLIO_LABEL};
use stockomatics::domain::errors::{
    AnalysisError, LoaderError, PerformanceError, PortfolioError, RenderError,
};
use stockomatics::domain::portfolio::Portfolio;
use stockomatics::domain::ports::{ChartRenderer, RenderOutcome};
use stockomatics::infrastructure::{CsvPriceSource, FileOrder, ReadSpec};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

fn source(window: usize) -> CsvPriceSource {
    CsvPriceSource::with_window(fixtures_dir(), window)
}

/// Keeps the last chart instead of drawing it
#[derive(Default)]
struct RecordingRenderer {
    last: RefCell<Option<ComparisonChart>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, chart: &ComparisonChart) -> Result<RenderOutcome, RenderError> {
        *self.last.borrow_mut() = Some(chart.clone());
        Ok(RenderOutcome::Displayed)
    }
}

#[test]
fn test_end_to_end_single_asset() {
    let portfolio = Portfolio::new([("btc", dec!(2))]).unwrap();
    let renderer = RecordingRenderer::default();

    let (report, outcome) = launch(&portfolio, &source(10), &renderer).unwrap();

    assert_eq!(outcome, RenderOutcome::Displayed);
    assert_eq!(
        report.portfolio_values.values(),
        vec![dec!(200), dec!(220), dec!(242)]
    );
    assert_eq!(
        report.portfolio_performance.points(),
        &[dec!(0), dec!(10), dec!(21)]
    );
    assert_eq!(
        report.market_performance.points(),
        &[dec!(0), dec!(5), dec!(10)]
    );

    let chart = renderer.last.borrow().clone().unwrap();
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].label, PORTFOLIO_LABEL);
    assert_eq!(chart.series[1].label, MARKET_LABEL);
    assert_eq!(chart.series[0].points[0], [1.0, 0.0]);
    assert_eq!(chart.series[0].points[2], [3.0, 21.0]);
}

#[test]
fn test_missing_rows_are_not_counted_toward_window() {
    let btc = source(3);
    let report = PerformanceAnalysis::new(&Portfolio::new([("btc", dec!(1))]).unwrap(), &btc)
        .run()
        .unwrap();

    let dates: Vec<&str> = report
        .portfolio_values
        .closes()
        .iter()
        .map(|c| c.date.as_str())
        .collect();
    assert_eq!(dates, vec!["2021-03-01", "2021-03-02", "2021-03-04"]);
    assert_eq!(report.market_caps.values(), vec![dec!(1000), dec!(1050), dec!(1100)]);
}

#[test]
fn test_multi_asset_portfolio_sums_values() {
    let portfolio = Portfolio::new([("btc", dec!(1)), ("eth", dec!(1))]).unwrap();
    let report = PerformanceAnalysis::new(&portfolio, &source(10))
        .run()
        .unwrap();

    assert_eq!(
        report.portfolio_values.values(),
        vec![dec!(1600), dec!(1760), dec!(1921)]
    );
    assert_eq!(
        report.portfolio_performance.points(),
        &[dec!(0), dec!(10), dec!(20.0625)]
    );
    assert_eq!(report.snapshot.spread_pct, dec!(10.0625));
}

#[test]
fn test_day_axis_follows_window() {
    let portfolio = Portfolio::new([("btc", dec!(2))]).unwrap();
    let renderer = RecordingRenderer::default();

    let (report, _) = launch(&portfolio, &source(2), &renderer).unwrap();

    assert_eq!(report.portfolio_performance.len(), 2);
    let chart = renderer.last.borrow().clone().unwrap();
    assert_eq!(chart.day_count(), 2);
    assert_eq!(chart.x_range(), (0.5, 2.5));
}

#[test]
fn test_zero_baseline_is_reported() {
    let portfolio = Portfolio::new([("zero", dec!(3))]).unwrap();
    let renderer = RecordingRenderer::default();

    let err = launch(&portfolio, &source(10), &renderer).unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Performance(PerformanceError::ZeroBaseline { .. })
    ));
    assert!(renderer.last.borrow().is_none());
}

#[test]
fn test_series_of_different_length_are_rejected() {
    let portfolio = Portfolio::new([("btc", dec!(1)), ("sol", dec!(10))]).unwrap();
    let err = PerformanceAnalysis::new(&portfolio, &source(10))
        .run()
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Portfolio(PortfolioError::MisalignedSeries { .. })
    ));
}

#[test]
fn test_series_on_different_dates_are_rejected() {
    let portfolio = Portfolio::new([("btc", dec!(1)), ("sol", dec!(10))]).unwrap();
    let err = PerformanceAnalysis::new(&portfolio, &source(2))
        .run()
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Portfolio(PortfolioError::MisalignedDates { .. })
    ));
}

#[test]
fn test_missing_price_file() {
    let portfolio = Portfolio::new([("doge", dec!(1000))]).unwrap();
    let err = PerformanceAnalysis::new(&portfolio, &source(10))
        .run()
        .unwrap_err();

    match err {
        AnalysisError::Loader(LoaderError::Io { path, .. }) => {
            assert!(path.ends_with("doge.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_default_config_reads_newest_first_market_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("btc.csv"),
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2021-03-01,1,1,1,100,100,10\n\
         2021-03-02,1,1,1,110,110,10\n\
         2021-03-03,1,1,1,121,121,10\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("total.csv"),
        "Date,Total\n2021-03-03,1200\n2021-03-02,1100\n2021-03-01,1000\n",
    )
    .unwrap();
    let data_dir = dir.path().display().to_string();

    let config = Config::from_lookup(&move |key| (key == "DATA_DIR").then(|| data_dir.clone())).unwrap();
    let portfolio = Portfolio::new([("btc", dec!(1))]).unwrap();

    let report = PerformanceAnalysis::new(&portfolio, &config.price_source())
        .run()
        .unwrap();

    assert_eq!(
        report.market_caps.values(),
        vec![dec!(1000), dec!(1100), dec!(1200)]
    );
    assert_eq!(
        report.market_performance.points(),
        &[dec!(0), dec!(10), dec!(20)]
    );
    assert_eq!(report.market_caps.closes()[0].date, "2021-03-01");
}

#[test]
fn test_oldest_first_market_file_override() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixtures_dir().join("btc.csv"), dir.path().join("btc.csv")).unwrap();
    fs::write(
        dir.path().join("cap.csv"),
        "Date,Total\n2021-02-28,900\n2021-03-01,1000\n2021-03-02,1100\n2021-03-04,1200\n",
    )
    .unwrap();

    let market_spec = ReadSpec {
        order: FileOrder::OldestFirst,
        ..ReadSpec::market_caps(3)
    };
    let source = CsvPriceSource::new(dir.path(), "cap.csv", ReadSpec::asset_closes(3), market_spec);
    let portfolio = Portfolio::new([("btc", dec!(1))]).unwrap();

    let report = PerformanceAnalysis::new(&portfolio, &source).run().unwrap();

    assert_eq!(
        report.market_caps.values(),
        vec![dec!(1000), dec!(1100), dec!(1200)]
    );
    assert_eq!(
        report.market_performance.points(),
        &[dec!(0), dec!(10), dec!(20)]
    );
}

#[test]
fn test_config_and_portfolio_file_drive_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let holdings = dir.path().join("portfolio.toml");
    fs::write(&holdings, "[holdings]\nbtc = 2\n").unwrap();
    let data_dir = fixtures_dir();

    let config = Config::from_lookup(&move |key| match key {
        "DATA_DIR" => Some(data_dir.display().to_string()),
        "WINDOW_DAYS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    let portfolio = PortfolioFile::load(&holdings).unwrap();

    let report = PerformanceAnalysis::new(&portfolio, &config.price_source())
        .run()
        .unwrap();

    assert_eq!(report.portfolio_values.values(), vec![dec!(220), dec!(242)]);
    assert_eq!(report.portfolio_performance.points(), &[dec!(0), dec!(10)]);
    assert_eq!(report.market_caps.values(), vec![dec!(1050), dec!(1100)]);

    let summary = RunSummary::new(&report).render();
    assert!(summary.contains("Days compared"));
}
