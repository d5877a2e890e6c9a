// Data models independent of any exchange API shape
pub mod timeseries;

// Re-export key types for convenience
pub use timeseries::OhlcvSeries;
