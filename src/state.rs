/// Host-side fight state — small trackers sampled by the analysis engine.
///
/// All state is owned by the engine instance; the whole replay is
/// single-threaded, so no locking is needed.
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Resource tracker
// ---------------------------------------------------------------------------

/// Last observed resource (energy) level of the actor, fed from the advanced
/// parameters of cast events. Backs the low-resource condition predicate.
#[derive(Debug, Default)]
pub struct ResourceTracker {
    current: Option<u32>,
}

impl ResourceTracker {
    pub fn record(&mut self, power: u32) {
        self.current = Some(power);
    }

    pub fn current(&self) -> Option<u32> {
        self.current
    }

    /// False until a level has been observed — never flag without evidence.
    pub fn is_below(&self, threshold: u32) -> bool {
        self.current.map(|c| c < threshold).unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Enemy tracker
// ---------------------------------------------------------------------------

/// Distinct targets the actor has damaged this fight. Backs the global
/// single-target gate.
#[derive(Debug, Default)]
pub struct EnemyTracker {
    seen: HashSet<String>,
}

impl EnemyTracker {
    pub fn record_target(&mut self, target_id: &str) {
        self.seen.insert(target_id.to_owned());
    }

    pub fn distinct_count(&self) -> usize {
        self.seen.len()
    }

    /// Exactly one distinct enemy makes a single-target fight; zero enemies
    /// do not.
    pub fn is_single_target_fight(&self) -> bool {
        self.seen.len() == 1
    }
}

// ---------------------------------------------------------------------------
// Fight clock
// ---------------------------------------------------------------------------

/// Raw timestamp bounds of the parsed event stream, used by the replay
/// driver to rebase timestamps and compute fight duration.
#[derive(Debug, Default)]
pub struct FightClock {
    start_ms: Option<u64>,
    end_ms:   Option<u64>,
}

impl FightClock {
    pub fn observe(&mut self, timestamp_ms: u64) {
        if self.start_ms.is_none() {
            self.start_ms = Some(timestamp_ms);
        }
        self.end_ms = Some(timestamp_ms);
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms.unwrap_or(0)
    }

    /// Duration of the observed stream. 0 for an empty or single-event fight.
    pub fn duration_ms(&self) -> u64 {
        match (self.start_ms, self.end_ms) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_tracker_needs_evidence() {
        let mut resources = ResourceTracker::default();
        assert!(!resources.is_below(70));
        resources.record(40);
        assert!(resources.is_below(70));
        resources.record(90);
        assert!(!resources.is_below(70));
        assert_eq!(resources.current(), Some(90));
    }

    #[test]
    fn enemy_tracker_counts_distinct_targets() {
        let mut enemies = EnemyTracker::default();
        assert!(!enemies.is_single_target_fight());

        enemies.record_target("Creature-A");
        enemies.record_target("Creature-A");
        assert_eq!(enemies.distinct_count(), 1);
        assert!(enemies.is_single_target_fight());

        enemies.record_target("Creature-B");
        assert_eq!(enemies.distinct_count(), 2);
        assert!(!enemies.is_single_target_fight());
    }

    #[test]
    fn fight_clock_bounds() {
        let mut clock = FightClock::default();
        assert_eq!(clock.duration_ms(), 0);

        clock.observe(72_000_000);
        assert_eq!(clock.duration_ms(), 0);

        clock.observe(72_180_000);
        assert_eq!(clock.start_ms(), 72_000_000);
        assert_eq!(clock.duration_ms(), 180_000);
    }
}
