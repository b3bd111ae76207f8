// Percentage performance conversion
pub mod calculator;

// Portfolio vs. market comparison
pub mod performance_snapshot;

pub use calculator::to_performance;
pub use performance_snapshot::PerformanceSnapshot;
