/// Canonical combat event model — every analysis component consumes this.
///
/// Events describe one actor's fight and arrive in non-decreasing timestamp
/// order. Timestamps are milliseconds relative to fight start (the replay
/// driver rebases raw log timestamps before the engine sees them). The engine
/// never re-sorts.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The actor activated an ability.
    Cast {
        timestamp:  u64,
        ability_id: u32,
        /// Actor's current resource (energy) from advanced log parameters,
        /// when the log carries them. Consumed only by the host-side
        /// resource tracker.
        power:      Option<u32>,
    },
    /// One of the actor's abilities dealt damage to a target.
    Damage {
        timestamp:   u64,
        ability_id:  u32,
        target_id:   String,
        /// True for damage-over-time ticks; ticks are never attributed
        /// to an activation.
        is_periodic: bool,
    },
    /// The analyzed ability went on cooldown.
    CooldownBegin {
        timestamp:  u64,
        ability_id: u32,
    },
    /// The analyzed ability came off cooldown.
    CooldownEnd {
        timestamp:  u64,
        ability_id: u32,
    },
    /// End of the encounter — finalizes any open activation records.
    FightEnd {
        timestamp: u64,
    },
}

impl Event {
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::Cast          { timestamp, .. } => *timestamp,
            Self::Damage        { timestamp, .. } => *timestamp,
            Self::CooldownBegin { timestamp, .. } => *timestamp,
            Self::CooldownEnd   { timestamp, .. } => *timestamp,
            Self::FightEnd      { timestamp }     => *timestamp,
        }
    }

    /// Ability this event concerns. `FightEnd` belongs to no ability.
    pub fn ability_id(&self) -> Option<u32> {
        match self {
            Self::Cast          { ability_id, .. } => Some(*ability_id),
            Self::Damage        { ability_id, .. } => Some(*ability_id),
            Self::CooldownBegin { ability_id, .. } => Some(*ability_id),
            Self::CooldownEnd   { ability_id, .. } => Some(*ability_id),
            Self::FightEnd      { .. }             => None,
        }
    }
}
