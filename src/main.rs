use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;
use stockomatics::application::{RunSummary, launch};
use stockomatics::config::{ChartEnvConfig, Config, PortfolioFile, parse_holding};
use stockomatics::domain::portfolio::Portfolio;
use stockomatics::domain::ports::ChartRenderer;
#[cfg(feature = "ui")]
use stockomatics::infrastructure::FallbackChartRenderer;
use stockomatics::infrastructure::PngChartRenderer;
use tracing::info;
#[cfg(not(feature = "ui"))]
use tracing::warn;

#[derive(Parser, Debug)]
#[command(author, version, about = "Portfolio vs. total crypto market performance", long_about = None)]
struct Cli {
    /// Portfolio TOML file with a [holdings] table
    #[arg(short, long)]
    portfolio: Option<PathBuf>,

    /// Holding as asset=quantity (repeatable)
    #[arg(long = "hold", value_name = "ASSET=QTY")]
    holdings: Vec<String>,

    /// Directory with <asset>.csv and the market cap file (overrides DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of most recent days to compare (overrides WINDOW_DAYS)
    #[arg(short, long)]
    window: Option<usize>,

    /// Write the chart to this PNG instead of opening a window
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Never open a window
    #[arg(long)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir.clone() {
        config.loader.data_dir = dir;
    }
    if let Some(window) = cli.window {
        if window == 0 {
            bail!("--window must be at least 1");
        }
        config.loader.window_days = window;
    }
    if cli.output.is_some() {
        config.chart.output = cli.output.clone();
    }
    config.chart.headless |= cli.headless;

    let portfolio = load_portfolio(&cli)?;
    info!(
        "Analyzing {} holdings over the last {} days from {}",
        portfolio.len(),
        config.loader.window_days,
        config.loader.data_dir.display()
    );

    let source = config.price_source();
    let renderer = chart_renderer(&config.chart);
    let (report, outcome) = launch(&portfolio, &source, renderer.as_ref())?;

    let summary = RunSummary::new(&report).with_outcome(&outcome);
    summary.log();
    summary.print();

    Ok(())
}

fn load_portfolio(cli: &Cli) -> anyhow::Result<Portfolio> {
    if !cli.holdings.is_empty() {
        let pairs = cli
            .holdings
            .iter()
            .map(|pair| parse_holding(pair))
            .collect::<anyhow::Result<Vec<_>>>()?;
        return Ok(Portfolio::new(pairs)?);
    }

    let path = cli
        .portfolio
        .clone()
        .context("No holdings given: pass --portfolio <file> or --hold asset=qty")?;
    PortfolioFile::load(&path)
}

fn png_renderer(chart: &ChartEnvConfig) -> PngChartRenderer {
    PngChartRenderer::new(chart.output_path()).with_size(chart.width, chart.height)
}

/// Native window with a PNG fallback, or the PNG writer alone when headless
/// or when an output file was requested.
#[cfg(feature = "ui")]
fn chart_renderer(config: &ChartEnvConfig) -> Box<dyn ChartRenderer> {
    use stockomatics::interfaces::NativeChartRenderer;

    if config.headless || config.output.is_some() {
        return Box::new(png_renderer(config));
    }

    let window = NativeChartRenderer::new(config.width as f32, config.height as f32);
    Box::new(FallbackChartRenderer::new(
        Box::new(window),
        Box::new(png_renderer(config)),
    ))
}

#[cfg(not(feature = "ui"))]
fn chart_renderer(config: &ChartEnvConfig) -> Box<dyn ChartRenderer> {
    if !config.headless && config.output.is_none() {
        warn!("Built without the ui feature, writing PNG instead");
    }
    Box::new(png_renderer(config))
}
