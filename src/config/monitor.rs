//! Monitoring and alerting configuration

use crate::utils::TimeUtils;

/// Settings for band computation and proximity alerts
pub struct AlertSettings {
    // Fractional distance from a level that counts as "approaching".
    // 0.002 corresponds to 0.2% of the level price.
    pub proximity_threshold: f64,
    // Number of trailing candles the support/resistance window spans
    pub lookback: usize,
    // Candles requested per fetch. Must be >= lookback or every cycle
    // fails with an insufficient-window error.
    pub fetch_limit: i32,
}

/// Settings for the polling loop and alert delivery cadence
pub struct ScheduleSettings {
    // Seconds between evaluation passes
    pub poll_interval_secs: u64,
    // Seconds between consolidated reports (also re-arms all signals)
    pub report_interval_secs: u64,
    // Intervals whose alerts are repeated (the slower, weightier timeframes)
    pub priority_intervals_ms: &'static [i64],
    // How many times a priority alert is sent
    pub priority_repeat_sends: u32,
    // Pause between repeated sends
    pub repeat_delay_secs: u64,
}

/// Settings for the default watchlist
pub struct WatchlistSettings {
    // Used when no pairs file is supplied on the command line
    pub default_symbols: &'static [&'static str],
    // Every symbol is watched on every one of these intervals
    pub intervals_ms: &'static [i64],
    // Hard cap on symbols read from a pairs file
    pub max_symbols: usize,
}

/// The Master Monitoring Configuration
pub struct MonitorConfig {
    pub alert: AlertSettings,
    pub schedule: ScheduleSettings,
    pub watchlist: WatchlistSettings,
}

pub const MONITOR: MonitorConfig = MonitorConfig {
    alert: AlertSettings {
        proximity_threshold: 0.002,
        lookback: 50,
        fetch_limit: 100,
    },

    schedule: ScheduleSettings {
        poll_interval_secs: 60,
        report_interval_secs: 3600,
        priority_intervals_ms: &[TimeUtils::MS_IN_H, TimeUtils::MS_IN_4_H, TimeUtils::MS_IN_D],
        priority_repeat_sends: 3,
        repeat_delay_secs: 5,
    },

    watchlist: WatchlistSettings {
        default_symbols: &["BNBUSDT", "ETHUSDT", "SOLUSDT", "BTCUSDT"],
        intervals_ms: &[
            TimeUtils::MS_IN_15_MIN,
            TimeUtils::MS_IN_H,
            TimeUtils::MS_IN_4_H,
            TimeUtils::MS_IN_D,
        ],
        max_symbols: 20,
    },
};
