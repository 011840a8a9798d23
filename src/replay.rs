/// Replay driver — turns a finished log into one analysis report.
///
/// Parses the log for the selected actor, rebases timestamps so the first
/// event is fight start, synthesizes cooldown transitions for the analyzed
/// ability (CooldownBegin at each observed cast, CooldownEnd one base
/// cooldown later — the log itself carries no cooldown bookkeeping, so it is
/// inferred from observed casts), appends FightEnd, and feeds the ordered
/// stream through the engine.
use crate::engine::{AbilityAnalysis, Report};
use crate::event::Event;
use crate::parser;
use crate::profiles::AbilityProfile;
use crate::state::FightClock;

/// Run one full analysis over a finished log. An empty or actor-less log
/// produces a zero report, never an error.
pub fn analyze_log(content: &str, actor: &str, profile: &AbilityProfile) -> Report {
    let mut clock = FightClock::default();
    let mut raw: Vec<Event> = Vec::new();
    for line in content.lines() {
        if let Some(event) = parser::parse_line(line, actor) {
            clock.observe(event.timestamp());
            raw.push(event);
        }
    }
    tracing::info!(
        "Parsed {} events for '{}' over {}ms",
        raw.len(),
        actor,
        clock.duration_ms()
    );

    let fight_start = clock.start_ms();
    let rebased: Vec<Event> = raw.into_iter().map(|e| rebase(e, fight_start)).collect();
    let events = enrich(rebased, profile);

    let mut engine = AbilityAnalysis::new(profile.clone());
    for event in &events {
        engine.process(event);
    }
    engine.report(clock.duration_ms())
}

/// Shift an event's timestamp so `fight_start` becomes 0.
fn rebase(event: Event, fight_start: u64) -> Event {
    match event {
        Event::Cast { timestamp, ability_id, power } => Event::Cast {
            timestamp: timestamp.saturating_sub(fight_start),
            ability_id,
            power,
        },
        Event::Damage { timestamp, ability_id, target_id, is_periodic } => Event::Damage {
            timestamp: timestamp.saturating_sub(fight_start),
            ability_id,
            target_id,
            is_periodic,
        },
        Event::CooldownBegin { timestamp, ability_id } => Event::CooldownBegin {
            timestamp: timestamp.saturating_sub(fight_start),
            ability_id,
        },
        Event::CooldownEnd { timestamp, ability_id } => Event::CooldownEnd {
            timestamp: timestamp.saturating_sub(fight_start),
            ability_id,
        },
        Event::FightEnd { timestamp } => Event::FightEnd {
            timestamp: timestamp.saturating_sub(fight_start),
        },
    }
}

/// Weave synthesized cooldown transitions into the rebased stream and close
/// it with FightEnd. Order stays non-decreasing: a pending CooldownEnd is
/// emitted before the first event at or past its timestamp, and an end still
/// pending past the last event is dropped (the ability never came back up).
fn enrich(events: Vec<Event>, profile: &AbilityProfile) -> Vec<Event> {
    let fight_end = events.last().map(Event::timestamp).unwrap_or(0);
    let mut out: Vec<Event> = Vec::with_capacity(events.len() + events.len() / 2 + 1);
    let mut pending_end: Option<u64> = None;

    for event in events {
        if let Some(end_ts) = pending_end {
            if end_ts <= event.timestamp() {
                out.push(Event::CooldownEnd { timestamp: end_ts, ability_id: profile.ability_id });
                pending_end = None;
            }
        }
        let tracked_cast =
            matches!(&event, Event::Cast { ability_id, .. } if *ability_id == profile.ability_id);
        let ts = event.timestamp();
        out.push(event);
        if tracked_cast {
            out.push(Event::CooldownBegin { timestamp: ts, ability_id: profile.ability_id });
            pending_end = Some(ts + profile.cooldown_ms);
        }
    }

    if let Some(end_ts) = pending_end {
        if end_ts <= fight_end {
            out.push(Event::CooldownEnd { timestamp: end_ts, ability_id: profile.ability_id });
        }
    }
    out.push(Event::FightEnd { timestamp: fight_end });
    out
}
