pub mod chart_window;
pub mod design_system;

pub use chart_window::NativeChartRenderer;
