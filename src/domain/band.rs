use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The two price levels derived from a trailing candle window. Recomputed
/// fresh every evaluation cycle and never retained between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub support: f64,
    pub resistance: f64,
}

impl Band {
    /// Percentage distance of `price` from the support level.
    pub fn support_proximity_pct(&self, price: f64) -> f64 {
        ((price - self.support) / self.support).abs() * 100.0
    }

    /// Percentage distance of `price` from the resistance level.
    pub fn resistance_proximity_pct(&self, price: f64) -> f64 {
        ((self.resistance - price) / self.resistance).abs() * 100.0
    }

    /// Distance to whichever side is closer. Used as the secondary sort key
    /// in the consolidated report.
    pub fn min_proximity_pct(&self, price: f64) -> f64 {
        self.support_proximity_pct(price)
            .min(self.resistance_proximity_pct(price))
    }
}

/// Which side of the band a signal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BandSide {
    Support,
    Resistance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_is_symmetric_around_levels() {
        let band = Band {
            support: 100.0,
            resistance: 110.0,
        };
        assert!((band.support_proximity_pct(100.1) - 0.1).abs() < 1e-9);
        assert!((band.support_proximity_pct(99.9) - 0.1).abs() < 1e-9);
        assert!((band.resistance_proximity_pct(110.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn min_proximity_picks_closer_side() {
        let band = Band {
            support: 100.0,
            resistance: 110.0,
        };
        // 109 is ~0.9% from resistance and 9% from support.
        let min = band.min_proximity_pct(109.0);
        assert!((min - band.resistance_proximity_pct(109.0)).abs() < 1e-9);
    }

    #[test]
    fn side_displays_uppercase_for_messages() {
        assert_eq!(BandSide::Support.to_string(), "SUPPORT");
        assert_eq!(BandSide::Resistance.to_string(), "RESISTANCE");
    }
}
