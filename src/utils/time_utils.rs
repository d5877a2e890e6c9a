use chrono::Utc;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_2_H: i64 = Self::MS_IN_H * 2;
    pub const MS_IN_4_H: i64 = Self::MS_IN_H * 4;
    pub const MS_IN_6_H: i64 = Self::MS_IN_H * 6;
    pub const MS_IN_12_H: i64 = Self::MS_IN_H * 12;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

    /// Convert interval in milliseconds to a Binance-style shorthand (e.g. `30m`, `1h`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_S => "1s",
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_5_MIN => "5m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "1h",
            Self::MS_IN_2_H => "2h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_6_H => "6h",
            Self::MS_IN_12_H => "12h",
            Self::MS_IN_D => "1d",
            Self::MS_IN_W => "1w",
            _ => "unknown",
        }
    }
}

/// Current wall-clock time formatted for the consolidated report header.
pub fn utc_now_string() -> String {
    Utc::now().format(TimeUtils::REPORT_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_shorthand_covers_watchlist_intervals() {
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_15_MIN), "15m");
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_H), "1h");
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_4_H), "4h");
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_D), "1d");
    }

    #[test]
    fn unknown_interval_does_not_panic() {
        assert_eq!(TimeUtils::interval_to_string(12345), "unknown");
    }
}
