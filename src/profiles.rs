/// Ability profile library — embedded at compile time from `data/profiles/*.toml`.
///
/// Profiles tie an analyzed ability (cooldown, resource threshold) to the
/// reference ability whose hit pattern classifies the fight, plus the
/// severity threshold tables for each reported metric. Embedding the files
/// at compile time means no runtime path resolution is needed.
use crate::analysis::thresholds::ThresholdTable;
use once_cell::sync::Lazy;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Embedded TOML data
// ---------------------------------------------------------------------------

const ROGUE_OUTLAW: &str = include_str!("../data/profiles/rogue_outlaw.toml");
const DRUID_FERAL:  &str = include_str!("../data/profiles/druid_feral.toml");

static ALL_PROFILE_DATA: &[&str] = &[
    ROGUE_OUTLAW,
    DRUID_FERAL,
];

// ---------------------------------------------------------------------------
// TOML deserialization structs (private)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TomlFile {
    profile: TomlProfile,
}

#[derive(Deserialize)]
struct TomlProfile {
    class:      String,
    spec:       String,
    ability:    TomlAbility,
    reference:  TomlReference,
    thresholds: TomlThresholds,
}

#[derive(Deserialize)]
struct TomlAbility {
    id:                 u32,
    name:               String,
    cooldown_ms:        u64,
    resource_threshold: u32,
}

#[derive(Deserialize)]
struct TomlReference {
    id:   u32,
    name: String,
}

#[derive(Deserialize)]
struct TomlThresholds {
    idle_single_target:  ThresholdTable,
    idle_multi_target:   ThresholdTable,
    hit_none_per_minute: ThresholdTable,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A fully-parsed profile used by the engine.
#[derive(Debug, Clone)]
pub struct AbilityProfile {
    pub class:     String,
    pub spec_name: String,

    pub ability_id:         u32,
    pub ability_name:       String,
    pub cooldown_ms:        u64,
    /// Resource level below which holding the ability counts as a delay.
    pub resource_threshold: u32,

    pub reference_id:   u32,
    pub reference_name: String,

    pub idle_single_target:  ThresholdTable,
    pub idle_multi_target:   ThresholdTable,
    pub hit_none_per_minute: ThresholdTable,
}

impl AbilityProfile {
    /// Canonical "CLASS/Spec" key used for lookup and display.
    pub fn key(&self) -> String {
        format!("{}/{}", self.class, self.spec_name)
    }
}

/// Lightweight descriptor for listing the embedded profiles.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileInfo {
    pub key:     String,
    pub class:   String,
    pub spec:    String,
    pub ability: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

static PROFILES: Lazy<Vec<AbilityProfile>> = Lazy::new(parse_all);

fn parse_all() -> Vec<AbilityProfile> {
    ALL_PROFILE_DATA
        .iter()
        .filter_map(|toml_str| {
            let file: TomlFile = toml::from_str(toml_str)
                .map_err(|e| tracing::warn!("Failed to parse profile TOML: {}", e))
                .ok()?;
            let p = file.profile;
            Some(AbilityProfile {
                class:               p.class,
                spec_name:           p.spec,
                ability_id:          p.ability.id,
                ability_name:        p.ability.name,
                cooldown_ms:         p.ability.cooldown_ms,
                resource_threshold:  p.ability.resource_threshold,
                reference_id:        p.reference.id,
                reference_name:      p.reference.name,
                idle_single_target:  p.thresholds.idle_single_target,
                idle_multi_target:   p.thresholds.idle_multi_target,
                hit_none_per_minute: p.thresholds.hit_none_per_minute,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Return display info for all embedded profiles.
pub fn list_all() -> Vec<ProfileInfo> {
    PROFILES
        .iter()
        .map(|p| ProfileInfo {
            key:     p.key(),
            class:   p.class.clone(),
            spec:    p.spec_name.clone(),
            ability: p.ability_name.clone(),
        })
        .collect()
}

/// Load a profile by its canonical "CLASS/Spec" key (case-insensitive).
pub fn load_by_key(key: &str) -> Option<AbilityProfile> {
    let (class, spec) = key.split_once('/')?;
    PROFILES
        .iter()
        .find(|p| p.class.eq_ignore_ascii_case(class) && p.spec_name.eq_ignore_ascii_case(spec))
        .cloned()
}
