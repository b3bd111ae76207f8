pub mod csv_source;
pub mod fallback_renderer;
pub mod in_memory;
pub mod png_renderer;

pub use csv_source::{CsvPriceSource, FileOrder, ReadSpec};
pub use fallback_renderer::FallbackChartRenderer;
pub use in_memory::InMemoryPriceSource;
pub use png_renderer::PngChartRenderer;
