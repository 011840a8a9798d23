/// Counts how many targets each activation of an ability hits.
///
/// Direct damage is attributed to the most recent activation of the same
/// ability when it lands within ATTRIBUTION_WINDOW_MS of the cast. Periodic
/// ticks are never attributed. A record finalizes when the next cast of the
/// same ability arrives or at fight end — never on window expiry alone, so
/// late damage is dropped by the window check while the record stays open.
use std::collections::HashSet;

/// Direct damage this long after a cast is attributed to it.
pub const ATTRIBUTION_WINDOW_MS: u64 = 250;

/// One activation of a tracked ability and the damage attributed to it.
#[derive(Debug, Clone)]
pub struct ActivationRecord {
    pub cast_timestamp:   u64,
    pub ability_id:       u32,
    pub hit_count:        u32,
    pub distinct_targets: HashSet<String>,
}

impl ActivationRecord {
    fn new(cast_timestamp: u64, ability_id: u32) -> Self {
        Self {
            cast_timestamp,
            ability_id,
            hit_count:        0,
            distinct_targets: HashSet::new(),
        }
    }

    pub fn is_multi_target(&self) -> bool {
        self.distinct_targets.len() > 1
    }
}

/// Per-ability hit statistics. At most one activation record is open at a
/// time; aggregate counters only move when a record finalizes.
#[derive(Debug)]
pub struct HitCountTracker {
    ability_id: u32,
    open:       Option<ActivationRecord>,

    pub total_casts:          u32,
    pub total_hits:           u32,
    pub casts_with_zero_hits: u32,
    pub casts_with_one_hit:   u32,
}

impl HitCountTracker {
    pub fn new(ability_id: u32) -> Self {
        Self {
            ability_id,
            open:                 None,
            total_casts:          0,
            total_hits:           0,
            casts_with_zero_hits: 0,
            casts_with_one_hit:   0,
        }
    }

    pub fn ability_id(&self) -> u32 {
        self.ability_id
    }

    /// Record a cast. Finalizes the previous activation of this ability (if
    /// any) and opens a new one. Returns the finalized record.
    pub fn on_cast(&mut self, timestamp: u64, ability_id: u32) -> Option<ActivationRecord> {
        if ability_id != self.ability_id {
            return None;
        }
        let finalized = self.finalize_open();
        self.open = Some(ActivationRecord::new(timestamp, ability_id));
        finalized
    }

    /// Attribute a damage event to the open activation, or drop it.
    pub fn on_damage(&mut self, timestamp: u64, ability_id: u32, target_id: &str, is_periodic: bool) {
        if is_periodic || ability_id != self.ability_id {
            return;
        }
        let Some(record) = self.open.as_mut() else {
            return;
        };
        if timestamp.saturating_sub(record.cast_timestamp) > ATTRIBUTION_WINDOW_MS {
            return;
        }
        record.hit_count += 1;
        record.distinct_targets.insert(target_id.to_owned());
    }

    /// Finalize the open activation at fight end, if any.
    pub fn on_fight_end(&mut self) -> Option<ActivationRecord> {
        self.finalize_open()
    }

    fn finalize_open(&mut self) -> Option<ActivationRecord> {
        let record = self.open.take()?;
        self.total_casts += 1;
        self.total_hits += record.hit_count;
        if record.hit_count == 0 {
            self.casts_with_zero_hits += 1;
        }
        if record.hit_count == 1 {
            self.casts_with_one_hit += 1;
        }
        Some(record)
    }

    pub fn average_targets_hit(&self) -> f64 {
        if self.total_casts == 0 {
            return 0.0;
        }
        f64::from(self.total_hits) / f64::from(self.total_casts)
    }

    pub fn hit_zero_per_minute(&self, fight_duration_ms: u64) -> f64 {
        per_minute(self.casts_with_zero_hits, fight_duration_ms)
    }

    pub fn hit_just_one_per_minute(&self, fight_duration_ms: u64) -> f64 {
        per_minute(self.casts_with_one_hit, fight_duration_ms)
    }
}

fn per_minute(count: u32, fight_duration_ms: u64) -> f64 {
    if fight_duration_ms == 0 {
        return 0.0;
    }
    f64::from(count) / fight_duration_ms as f64 * 60_000.0
}
