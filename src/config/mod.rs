//! Configuration module for the monitoring service.

pub mod binance;
pub mod monitor;
pub mod telegram;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig};
pub use monitor::MONITOR;
pub use telegram::TELEGRAM;
