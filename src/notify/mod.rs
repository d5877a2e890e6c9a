// Alert delivery: the Notifier seam plus the repeat/dispatch policy
pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::{Duration, sleep};

use crate::config::MONITOR;
use crate::domain::BandSide;
use crate::engine::evaluator::BandAlert;

// Re-export commonly used types
pub use telegram::TelegramNotifier;

/// Delivers a formatted message to the single configured destination.
/// Fire-and-forget; no delivery confirmation is modeled.
#[async_trait]
pub trait Notifier {
    async fn send_text(&self, text: &str) -> Result<()>;
}

/// Dry-run delivery: prints what would have been sent and succeeds.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_text(&self, text: &str) -> Result<()> {
        log::info!("[dry-run] would send:\n{}", text);
        Ok(())
    }
}

/// How many times an alert for this interval is delivered. The slower
/// timeframes carry more weight, so their alerts are repeated.
pub fn repeat_count(interval_ms: i64) -> u32 {
    if MONITOR
        .schedule
        .priority_intervals_ms
        .contains(&interval_ms)
    {
        MONITOR.schedule.priority_repeat_sends
    } else {
        1
    }
}

/// Render the per-alert Markdown message.
pub fn format_alert(alert: &BandAlert) -> String {
    let quote = alert.pair.quote_asset();
    match alert.side {
        BandSide::Support => format!(
            "⚠️ *{} is approaching SUPPORT level!* ⚠️\n\
             💰 Current Price: `{:.4} {}`\n\
             📉 Support: `{:.4} {}`\n\
             📊 Support Proximity: `%{:.2}`",
            alert.pair, alert.price, quote, alert.level, quote, alert.proximity_pct
        ),
        BandSide::Resistance => format!(
            "🚀 *{} is approaching RESISTANCE level!* 🚀\n\
             💰 Current Price: `{:.4} {}`\n\
             📈 Resistance: `{:.4} {}`\n\
             📊 Resistance Proximity: `%{:.2}`",
            alert.pair, alert.price, quote, alert.level, quote, alert.proximity_pct
        ),
    }
}

/// Send a fired alert, repeating for priority timeframes. Delivery failures
/// are logged and swallowed so a Telegram outage cannot stall the monitor.
pub async fn dispatch_alert<N: Notifier>(notifier: &N, alert: &BandAlert) {
    let text = format_alert(alert);
    let repeats = repeat_count(alert.pair.interval_ms);

    for attempt in 0..repeats {
        match notifier.send_text(&text).await {
            Ok(()) => log::info!("Alert sent for {} ({})", alert.pair, alert.side),
            Err(e) => log::error!("Alert delivery failed for {}: {:#}", alert.pair, e),
        }
        if attempt + 1 < repeats {
            sleep(Duration::from_secs(MONITOR.schedule.repeat_delay_secs)).await;
        }
    }
}
