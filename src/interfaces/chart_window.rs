use crate::domain::chart::ComparisonChart;
use crate::domain::errors::RenderError;
use crate::domain::ports::{ChartRenderer, RenderOutcome};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, Points};
use tracing::info;

/// Interactive window showing one comparison chart
pub struct PerformanceChartApp {
    chart: ComparisonChart,
}

impl PerformanceChartApp {
    pub fn new(chart: ComparisonChart) -> Self {
        Self { chart }
    }
}

impl eframe::App for PerformanceChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(DesignSystem::bold(&self.chart.title, DesignSystem::TITLE_SIZE));
                });
                ui.add_space(DesignSystem::SPACING_SMALL);
                render_chart(ui, &self.chart);
            });
    }
}

/// Draws each series as a dashed line with point markers, plus a legend.
pub fn render_chart(ui: &mut egui::Ui, chart: &ComparisonChart) {
    let (x_min, x_max) = chart.x_range();
    let (y_min, y_max) = chart.y_range();

    Plot::new("performance_comparison")
        .legend(Legend::default().position(Corner::LeftTop))
        .show_grid([true, true])
        .x_axis_label(DesignSystem::bold(&chart.x_label, 14.0))
        .y_axis_label(DesignSystem::bold(&chart.y_label, 14.0))
        .include_x(x_min)
        .include_x(x_max)
        .include_y(y_min)
        .include_y(y_max)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = DesignSystem::color(series.color);

                plot_ui.line(
                    Line::new(series.label.clone(), series.points.clone())
                        .color(color)
                        .width(DesignSystem::LINE_WIDTH)
                        .style(LineStyle::dashed_dense()),
                );
                plot_ui.points(
                    Points::new(series.label.clone(), series.points.clone())
                        .color(color)
                        .radius(DesignSystem::MARKER_RADIUS),
                );
            }
        });
}

/// Opens a native window and blocks until the viewer closes it.
#[derive(Debug, Clone)]
pub struct NativeChartRenderer {
    window_size: [f32; 2],
}

impl NativeChartRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            window_size: [width, height],
        }
    }
}

impl ChartRenderer for NativeChartRenderer {
    fn render(&self, chart: &ComparisonChart) -> Result<RenderOutcome, RenderError> {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.window_size)
                .with_title(chart.title.clone()),
            ..Default::default()
        };

        let app = PerformanceChartApp::new(chart.clone());

        info!("Opening chart window");
        eframe::run_native(
            "Stockomatics",
            native_options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| RenderError::Backend(format!("Eframe error: {}", e)))?;

        Ok(RenderOutcome::Displayed)
    }
}
