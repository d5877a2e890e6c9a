pub mod evaluator;
pub mod monitor;
pub mod report;
pub mod signal_state;

// Re-export key components
pub use evaluator::{BandAlert, evaluate_signals};
pub use monitor::BandMonitor;
pub use signal_state::{SignalKey, SignalStore};
