// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod notify;
pub mod utils;

// Re-export commonly used types
pub use data::{BinanceMarketData, MarketDataSource, load_watchlist};
pub use domain::{Band, BandSide, PairInterval};
pub use engine::{BandAlert, BandMonitor, SignalStore};
pub use models::OhlcvSeries;
pub use notify::{LogNotifier, Notifier, TelegramNotifier};

use anyhow::Result;
// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the symbol watchlist from a file (one Binance symbol per line)
    #[arg(long)]
    pub pairs_file: Option<PathBuf>,

    /// Log alerts and reports instead of delivering them to Telegram
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Wire up the collaborators and run the monitor until the process is killed.
pub async fn run(args: Cli) -> Result<()> {
    let pairs = load_watchlist(args.pairs_file.as_deref()).await?;
    let market = BinanceMarketData::connect()?;

    if args.dry_run {
        log::info!("Dry-run mode: alerts will be logged, not sent");
        BandMonitor::new(pairs, market, LogNotifier).run().await
    } else {
        let notifier = TelegramNotifier::from_env()?;
        BandMonitor::new(pairs, market, notifier).run().await
    }
}
