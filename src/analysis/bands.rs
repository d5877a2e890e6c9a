use std::error::Error;
use std::fmt;

use crate::domain::Band;
use crate::models::OhlcvSeries;

/// Failure modes of the band calculation itself. Upstream fetch errors never
/// reach this layer.
#[derive(Debug, PartialEq)]
pub enum BandError {
    // The window is shorter than the configured lookback. The original design
    // silently computed over the partial window; we refuse instead.
    InsufficientWindow { have: usize, need: usize },
}

impl fmt::Display for BandError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BandError::InsufficientWindow { have, need } => {
                write!(f, "insufficient candle window: have {}, need {}", have, need)
            }
        }
    }
}

impl Error for BandError {}

/// Support = lowest low, resistance = highest high over the trailing
/// `lookback` candles. Pure function; no side effects.
pub fn compute_band(series: &OhlcvSeries, lookback: usize) -> Result<Band, BandError> {
    let have = series.klines();
    if have < lookback || lookback == 0 {
        return Err(BandError::InsufficientWindow {
            have,
            need: lookback,
        });
    }

    let window_start = have - lookback;
    let support = series.low_prices[window_start..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let resistance = series.high_prices[window_start..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(Band {
        support,
        resistance,
    })
}
