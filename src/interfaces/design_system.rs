use crate::domain::chart::Rgb;
use eframe::egui;

/// Light chart theme
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(250, 250, 250);
    pub const BG_PANEL: egui::Color32 = egui::Color32::WHITE;

    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(20, 24, 31);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(90);

    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_gray(210);

    // --- Metrics ---

    pub const TITLE_SIZE: f32 = 20.0;
    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_LARGE: f32 = 24.0;
    pub const MARKER_RADIUS: f32 = 4.0;
    pub const LINE_WIDTH: f32 = 2.0;

    pub fn color(rgb: Rgb) -> egui::Color32 {
        egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Returns the visual style of the chart window
    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::light();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_SECONDARY);

        visuals
    }

    /// Application Main Layout Frame
    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_PANEL)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }

    /// Bold text for the title and axis labels
    pub fn bold(text: &str, size: f32) -> egui::RichText {
        egui::RichText::new(text)
            .strong()
            .size(size)
            .color(Self::TEXT_PRIMARY)
    }
}
