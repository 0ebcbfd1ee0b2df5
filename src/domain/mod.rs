// Domain layer - Readings, ranges and chart view models
pub mod chart;
pub mod error;
pub mod range;
pub mod reading;
