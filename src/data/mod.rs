// Market data retrieval and watchlist loading
pub mod binance;
pub mod watchlist;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::PairInterval;
use crate::models::OhlcvSeries;

// Re-export commonly used types
pub use binance::BinanceMarketData;
pub use watchlist::load_watchlist;

/// Narrow seam to whatever supplies candles and live prices. The production
/// implementation talks to the Binance spot REST API; tests substitute a
/// canned source.
#[async_trait]
pub trait MarketDataSource {
    /// Recent candle window for one pair, most-recent-last, at most `limit`
    /// candles.
    async fn fetch_ohlcv(&self, pair: &PairInterval, limit: i32) -> Result<OhlcvSeries>;

    /// Last traded price for a symbol.
    async fn fetch_last_price(&self, symbol: &str) -> Result<f64>;
}
