use std::fmt::Write as _;

use crate::domain::{Band, PairInterval};
use crate::utils::utc_now_string;

/// One pair's snapshot inside the consolidated report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub pair: PairInterval,
    pub price: f64,
    pub band: Band,
}

impl ReportEntry {
    fn min_proximity_pct(&self) -> f64 {
        self.band.min_proximity_pct(self.price)
    }
}

/// Order entries for display: configured symbol order first, then whichever
/// timeframe sits closest to one of its levels.
pub fn sort_entries(entries: &mut [ReportEntry], symbol_order: &[String]) {
    let rank = |symbol: &str| {
        symbol_order
            .iter()
            .position(|s| s == symbol)
            .unwrap_or(symbol_order.len())
    };

    entries.sort_by(|a, b| {
        rank(&a.pair.name)
            .cmp(&rank(&b.pair.name))
            .then(a.min_proximity_pct().total_cmp(&b.min_proximity_pct()))
    });
}

/// Render the consolidated Markdown message, one block per pair.
pub fn format_report(entries: &[ReportEntry]) -> String {
    let mut message = format!(
        "📊 *Latest Support & Resistance Levels* 📊\n_{}_\n",
        utc_now_string()
    );

    for entry in entries {
        let quote = entry.pair.quote_asset();
        let _ = write!(
            message,
            "\n🔹 *{}* 🔹\n\
             💰 Current Price: `{:.4} {}`\n\
             📉 Support: `{:.4} {}` (📏 %{:.2} away)\n\
             📈 Resistance: `{:.4} {}` (📏 %{:.2} away)\n",
            entry.pair,
            entry.price,
            quote,
            entry.band.support,
            quote,
            entry.band.support_proximity_pct(entry.price),
            entry.band.resistance,
            quote,
            entry.band.resistance_proximity_pct(entry.price),
        );
    }

    message
}
