use serde::{Deserialize, Serialize};

use crate::domain::pair_interval::PairInterval;

/// Raw candle window for one pair/interval, most-recent-last.
///
/// Stored column-wise so the band calculation can scan the low/high vectors
/// without materializing per-candle structs.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OhlcvSeries {
    pub pair_interval: PairInterval,
    pub first_kline_timestamp_ms: i64,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    // Volumes
    pub base_asset_volumes: Vec<f64>,
    pub quote_asset_volumes: Vec<f64>,
}

impl OhlcvSeries {
    pub fn klines(&self) -> usize {
        self.open_prices.len()
    }

    pub fn last_kline_timestamp_ms(&self) -> i64 {
        self.first_kline_timestamp_ms
            + (((self.open_prices.len().saturating_sub(1)) as i64)
                * self.pair_interval.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    #[test]
    fn last_timestamp_derives_from_interval_width() {
        let series = OhlcvSeries {
            pair_interval: PairInterval::new("BTCUSDT", TimeUtils::MS_IN_H),
            first_kline_timestamp_ms: 0,
            open_prices: vec![1.0, 2.0, 3.0],
            high_prices: vec![1.0, 2.0, 3.0],
            low_prices: vec![1.0, 2.0, 3.0],
            close_prices: vec![1.0, 2.0, 3.0],
            base_asset_volumes: vec![1.0, 1.0, 1.0],
            quote_asset_volumes: vec![1.0, 1.0, 1.0],
        };
        assert_eq!(series.klines(), 3);
        assert_eq!(series.last_kline_timestamp_ms(), 2 * TimeUtils::MS_IN_H);
    }
}
