/// Partitions the fight into single-target and multi-target stretches.
///
/// A segment is emitted every time a reference-ability activation finalizes:
/// it spans from the previous emission (or fight start) to the timestamp of
/// the event that finalized the record, and is classified by how many
/// distinct targets that activation hit. Segments are append-only and never
/// revised.
use crate::analysis::cooldown::DelayedActivation;
use crate::analysis::hit_count::ActivationRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    SingleTarget,
    MultiTarget,
}

#[derive(Debug, Clone)]
pub struct FightSegment {
    pub start_timestamp: u64,
    pub end_timestamp:   u64,
    pub regime:          Regime,
}

impl FightSegment {
    pub fn duration(&self) -> u64 {
        self.end_timestamp.saturating_sub(self.start_timestamp)
    }

    /// Half-open containment: a timestamp on a shared boundary belongs to
    /// the following segment.
    pub fn contains(&self, timestamp: u64) -> bool {
        self.start_timestamp <= timestamp && timestamp < self.end_timestamp
    }
}

#[derive(Debug, Default)]
pub struct RegimeTimeline {
    segments:      Vec<FightSegment>,
    last_boundary: u64,
}

impl RegimeTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one finalized reference activation. `finalized_at` is the
    /// timestamp of the event that finalized it — the next reference cast,
    /// or fight end.
    pub fn on_reference_finalized(&mut self, record: &ActivationRecord, finalized_at: u64) {
        let regime = if record.is_multi_target() {
            Regime::MultiTarget
        } else {
            Regime::SingleTarget
        };
        self.segments.push(FightSegment {
            start_timestamp: self.last_boundary,
            end_timestamp:   finalized_at,
            regime,
        });
        self.last_boundary = finalized_at;
    }

    pub fn segments(&self) -> &[FightSegment] {
        &self.segments
    }

    pub fn segment_count(&self, regime: Regime) -> usize {
        self.segments.iter().filter(|s| s.regime == regime).count()
    }

    /// Total duration of a regime's segments. A regime with no segments
    /// defaults to the whole fight — absent evidence to the contrary the
    /// fight is assumed to have been spent entirely in it.
    pub fn regime_duration(&self, regime: Regime, fight_duration_ms: u64) -> u64 {
        let mut total = 0u64;
        let mut seen = false;
        for segment in self.segments.iter().filter(|s| s.regime == regime) {
            seen = true;
            total += segment.duration();
        }
        if seen {
            total
        } else {
            fight_duration_ms
        }
    }

    /// Sum of idle durations whose timestamps fall inside this regime's
    /// segments. Timestamps contained by no segment are attributed to
    /// neither regime.
    pub fn flagged_idle_total(&self, regime: Regime, flagged: &[DelayedActivation]) -> u64 {
        flagged
            .iter()
            .filter(|d| {
                self.segments
                    .iter()
                    .any(|s| s.regime == regime && s.contains(d.timestamp))
            })
            .map(|d| d.idle_duration)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(cast_timestamp: u64, targets: &[&str]) -> ActivationRecord {
        ActivationRecord {
            cast_timestamp,
            ability_id:       1,
            hit_count:        targets.len() as u32,
            distinct_targets: targets.iter().map(|t| (*t).to_owned()).collect::<HashSet<_>>(),
        }
    }

    fn delayed(timestamp: u64, idle_duration: u64) -> DelayedActivation {
        DelayedActivation { timestamp, idle_duration, flagged: true }
    }

    #[test]
    fn segments_chain_from_fight_start() {
        let mut timeline = RegimeTimeline::new();
        timeline.on_reference_finalized(&record(0, &["a", "b"]), 10_000);
        timeline.on_reference_finalized(&record(10_000, &["a"]), 25_000);

        let segments = timeline.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_timestamp, 0);
        assert_eq!(segments[0].end_timestamp, 10_000);
        assert_eq!(segments[0].regime, Regime::MultiTarget);
        assert_eq!(segments[1].start_timestamp, 10_000);
        assert_eq!(segments[1].end_timestamp, 25_000);
        assert_eq!(segments[1].regime, Regime::SingleTarget);
    }

    #[test]
    fn zero_and_one_target_both_classify_single() {
        let mut timeline = RegimeTimeline::new();
        timeline.on_reference_finalized(&record(0, &[]), 5_000);
        timeline.on_reference_finalized(&record(5_000, &["a"]), 9_000);
        assert_eq!(timeline.segment_count(Regime::SingleTarget), 2);
        assert_eq!(timeline.segment_count(Regime::MultiTarget), 0);
    }

    #[test]
    fn regime_durations_sum_segments() {
        let mut timeline = RegimeTimeline::new();
        timeline.on_reference_finalized(&record(0, &["a", "b"]), 10_000);
        timeline.on_reference_finalized(&record(10_000, &["a"]), 25_000);
        timeline.on_reference_finalized(&record(25_000, &["a", "b", "c"]), 30_000);

        assert_eq!(timeline.regime_duration(Regime::MultiTarget, 60_000), 15_000);
        assert_eq!(timeline.regime_duration(Regime::SingleTarget, 60_000), 15_000);
    }

    #[test]
    fn empty_regime_defaults_to_whole_fight() {
        let mut timeline = RegimeTimeline::new();
        assert_eq!(timeline.regime_duration(Regime::SingleTarget, 60_000), 60_000);
        assert_eq!(timeline.regime_duration(Regime::MultiTarget, 60_000), 60_000);

        timeline.on_reference_finalized(&record(0, &["a"]), 60_000);
        assert_eq!(timeline.regime_duration(Regime::SingleTarget, 60_000), 60_000);
        // Still no multi-target evidence — falls back to the whole fight.
        assert_eq!(timeline.regime_duration(Regime::MultiTarget, 60_000), 60_000);
    }

    #[test]
    fn flagged_idle_attributed_by_containment() {
        let mut timeline = RegimeTimeline::new();
        timeline.on_reference_finalized(&record(0, &["a", "b"]), 10_000);
        timeline.on_reference_finalized(&record(10_000, &["a"]), 25_000);

        let flagged = [
            delayed(4_000, 1_500),  // multi-target stretch
            delayed(12_000, 2_000), // single-target stretch
            delayed(30_000, 9_999), // past the last segment — dropped
        ];
        assert_eq!(timeline.flagged_idle_total(Regime::MultiTarget, &flagged), 1_500);
        assert_eq!(timeline.flagged_idle_total(Regime::SingleTarget, &flagged), 2_000);
    }

    #[test]
    fn boundary_timestamp_belongs_to_following_segment() {
        let mut timeline = RegimeTimeline::new();
        timeline.on_reference_finalized(&record(0, &["a", "b"]), 10_000);
        timeline.on_reference_finalized(&record(10_000, &["a"]), 25_000);

        let flagged = [delayed(10_000, 700)];
        assert_eq!(timeline.flagged_idle_total(Regime::MultiTarget, &flagged), 0);
        assert_eq!(timeline.flagged_idle_total(Regime::SingleTarget, &flagged), 700);
    }
}
