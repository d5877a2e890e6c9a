use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::domain::{BandSide, PairInterval};

/// Identifies one alert type (support or resistance) for one pair/interval.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct SignalKey {
    pub symbol: String,
    pub interval_ms: i64,
    pub side: BandSide,
}

impl SignalKey {
    pub fn new(pair: &PairInterval, side: BandSide) -> Self {
        Self {
            symbol: pair.name.clone(),
            interval_ms: pair.interval_ms,
            side,
        }
    }
}

/// Tracks which alerts are currently "already notified" so a pair hovering
/// near a level does not spam a message every 60 seconds.
///
/// Owned by the monitor loop and mutated only by the proximity evaluator and
/// the report pass. Never persisted; process restart re-arms everything.
#[derive(Debug, Default)]
pub struct SignalStore {
    flags: HashMap<SignalKey, bool>,
}

impl SignalStore {
    /// Create a store with every pair x side combination armed (inactive).
    pub fn new(pairs: &[PairInterval]) -> Self {
        let mut flags = HashMap::new();
        for pair in pairs {
            for side in BandSide::iter() {
                flags.insert(SignalKey::new(pair, side), false);
            }
        }
        Self { flags }
    }

    pub fn is_active(&self, pair: &PairInterval, side: BandSide) -> bool {
        self.flags
            .get(&SignalKey::new(pair, side))
            .copied()
            .unwrap_or(false)
    }

    pub fn set_active(&mut self, pair: &PairInterval, side: BandSide, active: bool) {
        self.flags.insert(SignalKey::new(pair, side), active);
    }

    /// Re-arm every signal. Runs as part of each consolidated report pass.
    pub fn reset_all(&mut self) {
        for flag in self.flags.values_mut() {
            *flag = false;
        }
    }

    pub fn active_count(&self) -> usize {
        self.flags.values().filter(|&&active| active).count()
    }
}
