// Band derivation from candle windows
pub mod bands;

// Re-export commonly used items
pub use bands::{BandError, compute_band};
