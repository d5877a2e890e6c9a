use std::path::Path;

use anyhow::{Context, Result, bail};
use itertools::iproduct;
use tokio::fs;

use crate::config::MONITOR;
use crate::domain::PairInterval;

/// Parse a pairs file body: one symbol per line, trimmed and uppercased,
/// blank lines skipped, capped at the configured maximum.
pub fn parse_symbols(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .take(MONITOR.watchlist.max_symbols)
        .collect()
}

/// Cross the symbol list with the configured intervals, symbol-major, so
/// evaluation order (and report order) follows the file order.
pub fn pairs_for_symbols(symbols: &[String]) -> Vec<PairInterval> {
    iproduct!(symbols, MONITOR.watchlist.intervals_ms)
        .map(|(symbol, interval_ms)| PairInterval::new(symbol.clone(), *interval_ms))
        .collect()
}

/// Build the watchlist: symbols from `pairs_file` when given, otherwise the
/// built-in defaults. Fixed for the process lifetime.
pub async fn load_watchlist(pairs_file: Option<&Path>) -> Result<Vec<PairInterval>> {
    let symbols = match pairs_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read pairs file {}", path.display()))?;
            let symbols = parse_symbols(&content);
            if symbols.is_empty() {
                bail!("pairs file {} contains no symbols", path.display());
            }
            symbols
        }
        None => MONITOR
            .watchlist
            .default_symbols
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    log::info!(
        "Watching {} symbols across {} intervals",
        symbols.len(),
        MONITOR.watchlist.intervals_ms.len()
    );

    Ok(pairs_for_symbols(&symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    #[test]
    fn parses_trims_and_uppercases_symbols() {
        let symbols = parse_symbols("btcusdt\n  ethusdt  \n\nSOLUSDT\n");
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[test]
    fn symbol_cap_is_enforced() {
        let many: String = (0..100).map(|i| format!("SYM{}USDT\n", i)).collect();
        let symbols = parse_symbols(&many);
        assert_eq!(symbols.len(), MONITOR.watchlist.max_symbols);
    }

    #[test]
    fn pairs_are_symbol_major_in_file_order() {
        let symbols = vec!["BNBUSDT".to_string(), "BTCUSDT".to_string()];
        let pairs = pairs_for_symbols(&symbols);

        let intervals = MONITOR.watchlist.intervals_ms.len();
        assert_eq!(pairs.len(), 2 * intervals);
        // First block is all BNB, in configured interval order.
        assert!(pairs[..intervals].iter().all(|p| p.name == "BNBUSDT"));
        assert_eq!(pairs[0].interval_ms, TimeUtils::MS_IN_15_MIN);
        assert!(pairs[intervals..].iter().all(|p| p.name == "BTCUSDT"));
    }
}
