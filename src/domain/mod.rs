// Comparison chart model
pub mod chart;

// Domain-specific error types
pub mod errors;

// Percentage performance
pub mod performance;

// Holdings and valuation
pub mod portfolio;

// Port interfaces
pub mod ports;

// Daily value series
pub mod series;
