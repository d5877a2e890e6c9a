use anyhow::{Context, Result, bail};
use tokio::time::{Duration, Instant, sleep};

use crate::analysis::compute_band;
use crate::config::MONITOR;
use crate::data::MarketDataSource;
use crate::domain::PairInterval;
use crate::notify::{self, Notifier};

use super::evaluator::evaluate_signals;
use super::report::{ReportEntry, format_report, sort_entries};
use super::signal_state::SignalStore;

/// The polling loop. Owns the signal store and drives fetch -> band ->
/// evaluate for every pair, plus the periodic consolidated report.
///
/// One logical worker: awaits run strictly in sequence, so the store is
/// read-then-written within one pair's evaluation and no locking is needed.
pub struct BandMonitor<M, N> {
    /// Evaluation order is fixed: watchlist order, symbol-major.
    pub pairs: Vec<PairInterval>,
    /// Unique symbols in first-seen order; drives report sorting.
    pub symbol_order: Vec<String>,
    pub store: SignalStore,
    market: M,
    notifier: N,
}

impl<M: MarketDataSource, N: Notifier> BandMonitor<M, N> {
    pub fn new(pairs: Vec<PairInterval>, market: M, notifier: N) -> Self {
        let mut symbol_order: Vec<String> = Vec::new();
        for pair in &pairs {
            if !symbol_order.contains(&pair.name) {
                symbol_order.push(pair.name.clone());
            }
        }
        let store = SignalStore::new(&pairs);

        Self {
            pairs,
            symbol_order,
            store,
            market,
            notifier,
        }
    }

    /// Run until the process is killed. A report goes out immediately at
    /// startup, then every report interval; evaluation passes run between
    /// sleeps of the poll interval.
    pub async fn run(&mut self) -> Result<()> {
        if let Err(e) = self.send_full_report().await {
            log::error!("Startup report failed: {:#}", e);
        }
        let mut last_report_time = Instant::now();
        let report_interval = Duration::from_secs(MONITOR.schedule.report_interval_secs);

        loop {
            if last_report_time.elapsed() >= report_interval {
                if let Err(e) = self.send_full_report().await {
                    log::error!("Report failed: {:#}", e);
                }
                last_report_time = Instant::now();
            }

            self.run_pass().await;
            sleep(Duration::from_secs(MONITOR.schedule.poll_interval_secs)).await;
        }
    }

    /// One evaluation pass over every pair in fixed order. A failing pair is
    /// logged and skipped; it must not prevent evaluation of the rest.
    pub async fn run_pass(&mut self) {
        let pairs = self.pairs.clone();
        for pair in &pairs {
            if let Err(e) = self.evaluate_pair(pair).await {
                log::error!("{}: evaluation failed: {:#}", pair, e);
            }
        }
        log::debug!(
            "Pass complete; {} signal(s) currently active",
            self.store.active_count()
        );
    }

    async fn evaluate_pair(&mut self, pair: &PairInterval) -> Result<()> {
        let series = self
            .market
            .fetch_ohlcv(pair, MONITOR.alert.fetch_limit)
            .await?;
        let band = compute_band(&series, MONITOR.alert.lookback)?;
        let price = self.market.fetch_last_price(pair.bn_name()).await?;

        if let Some(alert) = evaluate_signals(
            pair,
            price,
            &band,
            MONITOR.alert.proximity_threshold,
            &mut self.store,
        ) {
            log::info!(
                "{}: {} alert fired at {:.4} (level {:.4})",
                pair,
                alert.side,
                alert.price,
                alert.level
            );
            notify::dispatch_alert(&self.notifier, &alert).await;
        }

        Ok(())
    }

    /// Build, sort, and deliver the consolidated report. Every report pass
    /// re-arms all signals, matching the original design.
    pub async fn send_full_report(&mut self) -> Result<()> {
        let mut entries = Vec::with_capacity(self.pairs.len());
        for pair in self.pairs.clone() {
            match self.report_entry(&pair).await {
                Ok(entry) => entries.push(entry),
                Err(e) => log::error!("{}: skipped in report: {:#}", pair, e),
            }
        }

        // Re-arm everything, including pairs that were skipped above.
        self.store.reset_all();

        if entries.is_empty() {
            bail!("no pair produced a report entry");
        }

        sort_entries(&mut entries, &self.symbol_order);
        let message = format_report(&entries);
        self.notifier
            .send_text(&message)
            .await
            .context("report delivery failed")
    }

    async fn report_entry(&self, pair: &PairInterval) -> Result<ReportEntry> {
        let series = self
            .market
            .fetch_ohlcv(pair, MONITOR.alert.fetch_limit)
            .await?;
        let band = compute_band(&series, MONITOR.alert.lookback)?;
        let price = self.market.fetch_last_price(pair.bn_name()).await?;

        Ok(ReportEntry {
            pair: pair.clone(),
            price,
            band,
        })
    }
}
