/// Derives percent-of-segment-duration idle metrics from the timeline.
///
/// Both regime percentages are always computed. The report surfaces only one
/// of them, selected by the global single-target gate — an instantaneous
/// signal (distinct enemy count) independent of the segments themselves. The
/// other is reported as zero. Both halves of that behavior are intentional
/// and covered by tests.
use crate::analysis::cooldown::DelayedActivation;
use crate::analysis::segments::{Regime, RegimeTimeline};
use serde::Serialize;

/// `flagged_idle / regime_duration`, guarded to 0 for an empty denominator.
pub fn percent_idle(flagged_idle_ms: u64, regime_duration_ms: u64) -> f64 {
    if regime_duration_ms == 0 {
        return 0.0;
    }
    flagged_idle_ms as f64 / regime_duration_ms as f64
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdleByRegime {
    pub percent_idle_single_target: f64,
    pub percent_idle_multi_target:  f64,
}

/// Compute both regime percentages, then zero the one the global gate rules
/// out.
pub fn gated_idle_percentages(
    timeline: &RegimeTimeline,
    flagged: &[DelayedActivation],
    fight_duration_ms: u64,
    single_target_fight: bool,
) -> IdleByRegime {
    let single = percent_idle(
        timeline.flagged_idle_total(Regime::SingleTarget, flagged),
        timeline.regime_duration(Regime::SingleTarget, fight_duration_ms),
    );
    let multi = percent_idle(
        timeline.flagged_idle_total(Regime::MultiTarget, flagged),
        timeline.regime_duration(Regime::MultiTarget, fight_duration_ms),
    );
    IdleByRegime {
        percent_idle_single_target: if single_target_fight { single } else { 0.0 },
        percent_idle_multi_target:  if single_target_fight { 0.0 } else { multi },
    }
}
