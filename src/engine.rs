/// Post-fight analysis engine — the "brain" of the replay.
///
/// One instance per (fight, actor, ability) tuple. Owns a hit tracker for
/// the analyzed ability, a hit tracker for the reference ability, the
/// cooldown tracker, the regime timeline, and the host-side trackers. The
/// whole pass is synchronous and deterministic: the same event sequence
/// always produces the same report.
use crate::{
    analysis::{
        cooldown::CooldownUsageTracker,
        hit_count::HitCountTracker,
        metrics,
        segments::{Regime, RegimeTimeline},
        thresholds::{self, Severity, ThresholdTable},
    },
    event::Event,
    profiles::AbilityProfile,
    state::{EnemyTracker, ResourceTracker},
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Report types (serialized as the JSON output of the binary)
// ---------------------------------------------------------------------------

/// Hit statistics for one tracked ability.
#[derive(Debug, Clone, Serialize)]
pub struct AbilityStats {
    pub ability_id:           u32,
    pub name:                 String,
    pub total_casts:          u32,
    pub total_hits:           u32,
    pub casts_with_zero_hits: u32,
    pub casts_with_one_hit:   u32,
    pub average_targets_hit:  f64,
    pub hit_zero_per_minute:  f64,
    pub hit_just_one_per_minute: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CooldownStats {
    pub delayed_activations:         usize,
    pub flagged_delayed_activations: usize,
    pub total_idle_ms:               u64,
    pub flagged_idle_ms:             u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegimeStats {
    pub single_target_segments:    usize,
    pub multi_target_segments:     usize,
    pub single_target_duration_ms: u64,
    pub multi_target_duration_ms:  u64,
    pub percent_idle_single_target: f64,
    pub percent_idle_multi_target:  f64,
}

/// One evaluated metric: its value, display form, and severity.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub metric:   String,
    pub value:    f64,
    pub display:  String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub profile:             String,
    pub fight_duration_ms:   u64,
    pub distinct_enemies:    usize,
    pub single_target_fight: bool,
    pub ability:             AbilityStats,
    pub reference:           AbilityStats,
    pub cooldown:            CooldownStats,
    pub regimes:             RegimeStats,
    pub findings:            Vec<Finding>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct AbilityAnalysis {
    profile:        AbilityProfile,
    ability_hits:   HitCountTracker,
    reference_hits: HitCountTracker,
    cooldown:       CooldownUsageTracker,
    timeline:       RegimeTimeline,
    resources:      Rc<RefCell<ResourceTracker>>,
    enemies:        EnemyTracker,
}

impl AbilityAnalysis {
    pub fn new(profile: AbilityProfile) -> Self {
        let resources = Rc::new(RefCell::new(ResourceTracker::default()));

        // The "should have been used" condition: the actor sat below the
        // profile's resource threshold while the ability was ready.
        let threshold = profile.resource_threshold;
        let sampled = Rc::clone(&resources);
        let cooldown = CooldownUsageTracker::new(
            profile.ability_id,
            Box::new(move |_timestamp| sampled.borrow().is_below(threshold)),
        );

        Self {
            ability_hits:   HitCountTracker::new(profile.ability_id),
            reference_hits: HitCountTracker::new(profile.reference_id),
            cooldown,
            timeline:       RegimeTimeline::new(),
            resources,
            enemies:        EnemyTracker::default(),
            profile,
        }
    }

    /// Feed one event. Events must arrive in non-decreasing timestamp order;
    /// the engine does not re-sort.
    pub fn process(&mut self, event: &Event) {
        match event {
            Event::Cast { timestamp, ability_id, power } => {
                if let Some(p) = power {
                    self.resources.borrow_mut().record(*p);
                }
                // Every cast by the actor samples the delay condition.
                self.cooldown.sample_condition(*timestamp);

                self.ability_hits.on_cast(*timestamp, *ability_id);
                if let Some(record) = self.reference_hits.on_cast(*timestamp, *ability_id) {
                    self.timeline.on_reference_finalized(&record, *timestamp);
                }
            }
            Event::Damage { timestamp, ability_id, target_id, is_periodic } => {
                self.enemies.record_target(target_id);
                self.ability_hits.on_damage(*timestamp, *ability_id, target_id, *is_periodic);
                self.reference_hits.on_damage(*timestamp, *ability_id, target_id, *is_periodic);
            }
            Event::CooldownBegin { timestamp, ability_id } => {
                self.cooldown.on_cooldown_begin(*timestamp, *ability_id);
            }
            Event::CooldownEnd { timestamp, ability_id } => {
                self.cooldown.on_cooldown_end(*timestamp, *ability_id);
            }
            Event::FightEnd { timestamp } => {
                self.ability_hits.on_fight_end();
                if let Some(record) = self.reference_hits.on_fight_end() {
                    self.timeline.on_reference_finalized(&record, *timestamp);
                }
                tracing::debug!(
                    "Fight ended at {}ms — {} segments, {} delayed activations",
                    timestamp,
                    self.timeline.segments().len(),
                    self.cooldown.all_delayed().len()
                );
            }
        }
    }

    /// Assemble the numeric report. `fight_duration_ms` is supplied by the
    /// host and backs every per-minute and percentage denominator.
    pub fn report(&self, fight_duration_ms: u64) -> Report {
        let single_target_fight = self.enemies.is_single_target_fight();

        let idle = metrics::gated_idle_percentages(
            &self.timeline,
            self.cooldown.flagged_delayed(),
            fight_duration_ms,
            single_target_fight,
        );

        let findings = vec![
            finding(
                "idle_single_target",
                idle.percent_idle_single_target,
                &self.profile.idle_single_target,
            ),
            finding(
                "idle_multi_target",
                idle.percent_idle_multi_target,
                &self.profile.idle_multi_target,
            ),
            finding(
                "hit_none_per_minute",
                self.ability_hits.hit_zero_per_minute(fight_duration_ms),
                &self.profile.hit_none_per_minute,
            ),
        ];

        Report {
            profile:             self.profile.key(),
            fight_duration_ms,
            distinct_enemies:    self.enemies.distinct_count(),
            single_target_fight,
            ability:             ability_stats(
                &self.ability_hits,
                &self.profile.ability_name,
                fight_duration_ms,
            ),
            reference:           ability_stats(
                &self.reference_hits,
                &self.profile.reference_name,
                fight_duration_ms,
            ),
            cooldown:            CooldownStats {
                delayed_activations:         self.cooldown.all_delayed().len(),
                flagged_delayed_activations: self.cooldown.flagged_delayed().len(),
                total_idle_ms:               self.cooldown.total_idle_ms(),
                flagged_idle_ms:             self.cooldown.flagged_idle_ms(),
            },
            regimes:             RegimeStats {
                single_target_segments:    self.timeline.segment_count(Regime::SingleTarget),
                multi_target_segments:     self.timeline.segment_count(Regime::MultiTarget),
                single_target_duration_ms: self
                    .timeline
                    .regime_duration(Regime::SingleTarget, fight_duration_ms),
                multi_target_duration_ms:  self
                    .timeline
                    .regime_duration(Regime::MultiTarget, fight_duration_ms),
                percent_idle_single_target: idle.percent_idle_single_target,
                percent_idle_multi_target:  idle.percent_idle_multi_target,
            },
            findings,
        }
    }
}

fn ability_stats(tracker: &HitCountTracker, name: &str, fight_duration_ms: u64) -> AbilityStats {
    AbilityStats {
        ability_id:           tracker.ability_id(),
        name:                 name.to_owned(),
        total_casts:          tracker.total_casts,
        total_hits:           tracker.total_hits,
        casts_with_zero_hits: tracker.casts_with_zero_hits,
        casts_with_one_hit:   tracker.casts_with_one_hit,
        average_targets_hit:  tracker.average_targets_hit(),
        hit_zero_per_minute:  tracker.hit_zero_per_minute(fight_duration_ms),
        hit_just_one_per_minute: tracker.hit_just_one_per_minute(fight_duration_ms),
    }
}

fn finding(metric: &str, value: f64, table: &ThresholdTable) -> Finding {
    Finding {
        metric:   metric.to_owned(),
        value,
        display:  thresholds::format_value(value, table.style),
        severity: thresholds::classify(value, table),
    }
}
