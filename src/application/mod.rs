// Pipeline orchestration
pub mod analysis;

// Console summary
pub mod reporting;

pub use analysis::{AnalysisReport, PerformanceAnalysis, launch};
pub use reporting::RunSummary;
