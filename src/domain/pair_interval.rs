use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;

/// One unit of monitoring: a Binance symbol plus the candle interval we watch
/// it on. `BTCUSDT` at `1h` and `BTCUSDT` at `4h` are two distinct units with
/// independent alert state.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct PairInterval {
    pub name: String,
    pub interval_ms: i64,
}

impl PairInterval {
    pub fn new(name: impl Into<String>, interval_ms: i64) -> Self {
        Self {
            name: name.into(),
            interval_ms,
        }
    }

    pub fn get_base(text: &str) -> Option<&str> {
        let quote = Self::get_quote(text)?;
        // strip_suffix returns None for a malformed name where the quote is
        // not actually at the end.
        text.strip_suffix(quote)
    }

    // Finds the trading quote at the end of the pair name and returns it.
    // Returns None if no matching quote is found.
    pub fn get_quote(text: &str) -> Option<&str> {
        static PAIR_QUOTES: &[&str] = &["USDT", "USDC", "FDUSD", "BTC", "ETH"];
        PAIR_QUOTES
            .iter()
            .find(|&&ext| text.ends_with(ext))
            .copied()
    }

    // Split the name into base and quote assets for display purposes.
    pub fn split_pair_name(pair_name: &str) -> (&str, &str) {
        match (Self::get_base(pair_name), Self::get_quote(pair_name)) {
            (Some(base), Some(quote)) => (base, quote),
            _ => (pair_name, "USDT"),
        }
    }

    // The name we pass into the Binance API (not necessarily display name)
    pub fn bn_name(&self) -> &str {
        &self.name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quote asset used when printing prices (`117000.0000 USDT`).
    pub fn quote_asset(&self) -> &str {
        Self::split_pair_name(&self.name).1
    }

    /// Binance shorthand for the interval, e.g. `15m` or `1d`.
    pub fn timeframe(&self) -> &'static str {
        TimeUtils::interval_to_string(self.interval_ms)
    }

    /// Human-readable pair label for messages, e.g. `BTC/USDT`.
    pub fn display_name(&self) -> String {
        let (base, quote) = Self::split_pair_name(&self.name);
        format!("{}/{}", base, quote)
    }
}

impl std::fmt::Display for PairInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.timeframe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_known_quote_assets() {
        assert_eq!(PairInterval::split_pair_name("BTCUSDT"), ("BTC", "USDT"));
        assert_eq!(PairInterval::split_pair_name("ETHBTC"), ("ETH", "BTC"));
        assert_eq!(PairInterval::split_pair_name("SOLFDUSD"), ("SOL", "FDUSD"));
    }

    #[test]
    fn unknown_quote_falls_back_to_raw_name() {
        assert_eq!(PairInterval::split_pair_name("WEIRD"), ("WEIRD", "USDT"));
    }

    #[test]
    fn display_includes_pair_and_timeframe() {
        let pair = PairInterval::new("BTCUSDT", TimeUtils::MS_IN_H);
        assert_eq!(pair.to_string(), "BTC/USDT (1h)");
    }
}
