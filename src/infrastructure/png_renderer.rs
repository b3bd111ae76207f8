use crate::domain::chart::ComparisonChart;
use crate::domain::errors::RenderError;
use crate::domain::ports::{ChartRenderer, RenderOutcome};
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes the comparison chart to a PNG file. Works without a display.
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 1200,
            height: 800,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

fn backend_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, chart: &ComparisonChart) -> Result<RenderOutcome, RenderError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        {
            let root = BitMapBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(backend_error)?;

            let (x_min, x_max) = chart.x_range();
            let (y_min, y_max) = chart.y_range();

            let mut plot = ChartBuilder::on(&root)
                .caption(
                    &chart.title,
                    ("sans-serif", 28).into_font().style(FontStyle::Bold),
                )
                .margin(15)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(backend_error)?;

            plot.configure_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .axis_desc_style(("sans-serif", 18).into_font().style(FontStyle::Bold))
                .x_labels(chart.day_count().max(1))
                .x_label_formatter(&|day: &f64| format!("{:.0}", day))
                .y_label_formatter(&|pct: &f64| format!("{:.1}", pct))
                .draw()
                .map_err(backend_error)?;

            for series in &chart.series {
                let color = RGBColor(series.color.0, series.color.1, series.color.2);

                // Solid here, dashed in the window
                plot.draw_series(LineSeries::new(
                    series.points.iter().map(|p| (p[0], p[1])),
                    color.stroke_width(2),
                ))
                .map_err(backend_error)?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

                plot.draw_series(
                    series
                        .points
                        .iter()
                        .map(|p| Circle::new((p[0], p[1]), 4, color.filled())),
                )
                .map_err(backend_error)?;
            }

            plot.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(backend_error)?;

            root.present().map_err(backend_error)?;
        }

        info!("Chart written to {}", self.path.display());
        Ok(RenderOutcome::Written(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        let renderer = PngChartRenderer::new("out/chart.png");
        assert_eq!((renderer.width, renderer.height), (1200, 800));
        assert_eq!(renderer.path, PathBuf::from("out/chart.png"));
    }

    #[test]
    fn test_with_size() {
        let renderer = PngChartRenderer::new("chart.png").with_size(640, 480);
        assert_eq!((renderer.width, renderer.height), (640, 480));
    }
}
