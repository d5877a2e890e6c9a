use crate::domain::{Band, BandSide, PairInterval};

use super::signal_state::SignalStore;

/// A fire transition: price entered a band this cycle and the matching signal
/// was not already active.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAlert {
    pub pair: PairInterval,
    pub side: BandSide,
    pub price: f64,
    pub level: f64,
    pub proximity_pct: f64,
}

/// Decide fire / suppress / reset for one pair on one evaluation cycle.
///
/// The fire checks are an if/else-if chain: when a band is so narrow that
/// both conditions hold numerically, support wins and resistance is not
/// considered this cycle. The hysteresis resets below run as two independent
/// ifs, so a reset on one side can coexist with a fire on the other within
/// the same cycle. That asymmetry is intentional; see DESIGN.md.
pub fn evaluate_signals(
    pair: &PairInterval,
    price: f64,
    band: &Band,
    threshold: f64,
    store: &mut SignalStore,
) -> Option<BandAlert> {
    let support_ceiling = band.support * (1.0 + threshold);
    let resistance_floor = band.resistance * (1.0 - threshold);

    let mut fired = None;

    // Approaching support: just above the level, within the threshold band.
    if price > band.support && price <= support_ceiling {
        if !store.is_active(pair, BandSide::Support) {
            store.set_active(pair, BandSide::Support, true);
            fired = Some(BandAlert {
                pair: pair.clone(),
                side: BandSide::Support,
                price,
                level: band.support,
                proximity_pct: band.support_proximity_pct(price),
            });
        }
    // Approaching resistance: just below the level, within the threshold band.
    } else if price < band.resistance && price >= resistance_floor {
        if !store.is_active(pair, BandSide::Resistance) {
            store.set_active(pair, BandSide::Resistance, true);
            fired = Some(BandAlert {
                pair: pair.clone(),
                side: BandSide::Resistance,
                price,
                level: band.resistance,
                proximity_pct: band.resistance_proximity_pct(price),
            });
        }
    }

    // Hysteresis: once price is clear of a level, its signal re-arms.
    if price > support_ceiling {
        store.set_active(pair, BandSide::Support, false);
    }
    if price < resistance_floor {
        store.set_active(pair, BandSide::Resistance, false);
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    const THRESHOLD: f64 = 0.002;

    fn pair() -> PairInterval {
        PairInterval::new("BTCUSDT", TimeUtils::MS_IN_H)
    }

    fn band() -> Band {
        Band {
            support: 100.0,
            resistance: 110.0,
        }
    }

    fn store() -> SignalStore {
        SignalStore::new(&[pair()])
    }

    #[test]
    fn fires_support_alert_inside_band_and_flips_active() {
        let pair = pair();
        let mut store = store();

        // 100.1 sits inside (100, 100.2].
        let alert = evaluate_signals(&pair, 100.1, &band(), THRESHOLD, &mut store)
            .expect("price inside support band must fire");
        assert_eq!(alert.side, BandSide::Support);
        assert_eq!(alert.level, 100.0);
        assert!(store.is_active(&pair, BandSide::Support));
    }

    #[test]
    fn repeated_evaluation_at_same_price_is_suppressed() {
        let pair = pair();
        let mut store = store();

        assert!(evaluate_signals(&pair, 100.1, &band(), THRESHOLD, &mut store).is_some());
        for _ in 0..5 {
            assert!(
                evaluate_signals(&pair, 100.1, &band(), THRESHOLD, &mut store).is_none(),
                "an active signal must not fire again"
            );
        }
    }

    #[test]
    fn price_above_threshold_band_resets_support() {
        let pair = pair();
        let mut store = store();

        assert!(evaluate_signals(&pair, 100.1, &band(), THRESHOLD, &mut store).is_some());
        // 100.3 > 100.2: outside the band, no alert, and the signal re-arms.
        assert!(evaluate_signals(&pair, 100.3, &band(), THRESHOLD, &mut store).is_none());
        assert!(!store.is_active(&pair, BandSide::Support));

        // Re-entering the band fires again after the reset.
        assert!(evaluate_signals(&pair, 100.15, &band(), THRESHOLD, &mut store).is_some());
    }

    #[test]
    fn reset_applies_regardless_of_prior_state() {
        let pair = pair();
        let mut store = store();

        // Never fired, still inactive after a far-away price.
        assert!(evaluate_signals(&pair, 105.0, &band(), THRESHOLD, &mut store).is_none());
        assert!(!store.is_active(&pair, BandSide::Support));
        assert!(!store.is_active(&pair, BandSide::Resistance));
    }

    #[test]
    fn fires_resistance_alert_below_level() {
        let pair = pair();
        let mut store = store();

        // 109.9 sits inside [109.78, 110).
        let alert = evaluate_signals(&pair, 109.9, &band(), THRESHOLD, &mut store)
            .expect("price inside resistance band must fire");
        assert_eq!(alert.side, BandSide::Resistance);
        assert_eq!(alert.level, 110.0);
        assert!(store.is_active(&pair, BandSide::Resistance));
    }

    #[test]
    fn support_takes_priority_when_band_is_degenerate() {
        let pair = pair();
        let mut store = store();
        // Band so narrow that one price satisfies both fire conditions.
        let narrow = Band {
            support: 100.0,
            resistance: 100.05,
        };

        let alert = evaluate_signals(&pair, 100.01, &narrow, THRESHOLD, &mut store)
            .expect("must fire exactly one alert");
        assert_eq!(alert.side, BandSide::Support, "support check runs first");
        assert!(!store.is_active(&pair, BandSide::Resistance));
    }

    #[test]
    fn support_fire_coexists_with_resistance_reset() {
        let pair = pair();
        let mut store = store();

        // Arm resistance first.
        assert!(evaluate_signals(&pair, 109.9, &band(), THRESHOLD, &mut store).is_some());
        assert!(store.is_active(&pair, BandSide::Resistance));

        // Price drops into the support band: support fires, and the
        // independent reset pass re-arms resistance in the same cycle.
        let alert = evaluate_signals(&pair, 100.1, &band(), THRESHOLD, &mut store)
            .expect("support must fire");
        assert_eq!(alert.side, BandSide::Support);
        assert!(!store.is_active(&pair, BandSide::Resistance));
    }

    #[test]
    fn price_exactly_on_support_does_not_fire() {
        let pair = pair();
        let mut store = store();
        // Condition is strict: support < price.
        assert!(evaluate_signals(&pair, 100.0, &band(), THRESHOLD, &mut store).is_none());
    }
}
