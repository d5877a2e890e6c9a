// Domain types and value objects
pub mod band;
pub mod pair_interval;

// Re-export commonly used types
pub use band::{Band, BandSide};
pub use pair_interval::PairInterval;
