/// Parses finished WoW combat log lines into typed `Event`s for one actor.
///
/// Log line format:
///
///   TIMESTAMP  SUBEVENT,HIDECASTER,SOURCEGUID,SOURCENAME,SOURCEFLAGS,SOURCERAIDFLAGS,
///              DESTGUID,DESTNAME,DESTFLAGS,DESTRAIDFLAGS,[subevent-specific fields...]
///
/// Field indices (0-based after splitting on comma):
///   [0]  subevent name (e.g. "SPELL_DAMAGE")
///   [1]  hidecaster (0 or 1)
///   [2]  source GUID
///   [3]  source name (quoted)
///   [6]  dest GUID
///   [7]  dest name (quoted)
///   [10] spell ID
///   [11] spell name (quoted)
///   [12] spell school
///   [13+] subevent-specific; with advanced logging enabled, cast events
///         carry unit info here, of which only [22] (current power) is read.
///
/// Only the selected actor's events become `Event`s; everything else — other
/// actors, unrecognized subevents, malformed lines — yields `None`.
use crate::event::Event;

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse the log timestamp prefix "M/D HH:MM:SS.mmm" into milliseconds.
/// Values are not anchored to a real epoch — they are only used relative to
/// each other, and the replay driver rebases them to fight start.
fn parse_timestamp(date_time: &str) -> Option<u64> {
    // date_time looks like "5/21 20:14:33.123" — split on space
    let mut parts = date_time.splitn(2, ' ');
    let _date = parts.next()?; // e.g. "5/21" — unused
    let time  = parts.next()?; // e.g. "20:14:33.123"

    let mut time_parts = time.splitn(3, ':');
    let h:  u64 = time_parts.next()?.parse().ok()?;
    let m:  u64 = time_parts.next()?.parse().ok()?;
    let sm: &str = time_parts.next()?;

    let (s_str, ms_str) = sm.split_once('.').unwrap_or((sm, "0"));
    let s:  u64 = s_str.parse().ok()?;
    let ms: u64 = ms_str.parse().ok()?;

    Some((h * 3_600 + m * 60 + s) * 1_000 + ms)
}

/// Strip surrounding double-quotes from a field value.
#[inline]
fn unquote(s: &str) -> &str {
    s.trim_matches('"')
}

/// Split a raw log line into (timestamp_ms, fields[]). The timestamp ends at
/// the double-space separator.
fn split_line(raw: &str) -> Option<(u64, Vec<&str>)> {
    let sep = raw.find("  ")?;
    let ts_str  = &raw[..sep];
    let payload = &raw[sep + 2..];

    let ts_ms = parse_timestamp(ts_str)?;

    // 32 fields covers the advanced-parameter block on cast events; quoted
    // commas in names are handled by unquote() on the known name fields.
    let fields: Vec<&str> = payload.splitn(32, ',').collect();

    Some((ts_ms, fields))
}

/// True when the line's source is the selected actor, matched by name or GUID.
fn is_actor(fields: &[&str], actor: &str) -> bool {
    fields.get(2).map(|g| unquote(g) == actor).unwrap_or(false)
        || fields.get(3).map(|n| unquote(n) == actor).unwrap_or(false)
}

pub fn parse_line(raw: &str, actor: &str) -> Option<Event> {
    let (ts, f) = split_line(raw)?;

    if !is_actor(&f, actor) {
        return None;
    }

    match *f.first()? {
        "SPELL_CAST_SUCCESS" => {
            let ability_id: u32 = f.get(10)?.parse().ok()?;
            // Advanced logging puts the caster's current power at [22];
            // absent or unparsable means the log ran without it.
            let power = f.get(22).and_then(|v| v.parse().ok());
            Some(Event::Cast { timestamp: ts, ability_id, power })
        }
        "SPELL_DAMAGE" | "RANGE_DAMAGE" => {
            let ability_id: u32 = f.get(10)?.parse().ok()?;
            let target_id = unquote(f.get(6)?).to_owned();
            Some(Event::Damage { timestamp: ts, ability_id, target_id, is_periodic: false })
        }
        "SPELL_PERIODIC_DAMAGE" => {
            let ability_id: u32 = f.get(10)?.parse().ok()?;
            let target_id = unquote(f.get(6)?).to_owned();
            Some(Event::Damage { timestamp: ts, ability_id, target_id, is_periodic: true })
        }
        _ => None, // Unrecognized subevent — silently skip
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    const CAST_ADVANCED_LINE: &str = r#"5/21 20:14:35.100  SPELL_CAST_SUCCESS,0,Player-1234-ABCDEF,"Renzik",0x511,0x0,0000000000000000,"",0x80,0x0,271877,"Blade Rush",0x1,Player-1234-ABCDEF,0000000000000000,423810,423810,14221,2001,5893,0,3,54,100,0,102.5,-442.1"#;

    const CAST_PLAIN_LINE: &str = r#"5/21 20:14:36.200  SPELL_CAST_SUCCESS,0,Player-1234-ABCDEF,"Renzik",0x511,0x0,0000000000000000,"",0x80,0x0,13877,"Blade Flurry",0x1"#;

    const DAMAGE_LINE: &str = r#"5/21 20:14:35.250  SPELL_DAMAGE,0,Player-1234-ABCDEF,"Renzik",0x511,0x0,Creature-0-4372-ABCD-001,"Grunt",0xa48,0x0,271881,"Blade Rush",0x1,0,18250,0,0,0,0,nil,nil,nil"#;

    const PERIODIC_LINE: &str = r#"5/21 20:14:37.000  SPELL_PERIODIC_DAMAGE,0,Player-1234-ABCDEF,"Renzik",0x511,0x0,Creature-0-4372-ABCD-001,"Grunt",0xa48,0x0,703,"Garrote",0x1,0,4100,0,0,0,0,nil,nil,nil"#;

    const OTHER_ACTOR_LINE: &str = r#"5/21 20:14:35.300  SPELL_DAMAGE,0,Player-9999-FFFFFF,"Vess",0x511,0x0,Creature-0-4372-ABCD-001,"Grunt",0xa48,0x0,1234,"Smite",0x2,0,900,0,0,0,0,nil,nil,nil"#;

    #[test]
    fn parses_cast_with_advanced_power() {
        let e = parse_line(CAST_ADVANCED_LINE, "Renzik").expect("should parse");
        match e {
            Event::Cast { ability_id, power, timestamp } => {
                assert_eq!(ability_id, 271877);
                assert_eq!(power, Some(54));
                assert_eq!(timestamp, (20 * 3_600 + 14 * 60 + 35) * 1_000 + 100);
            }
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn parses_cast_without_advanced_params() {
        let e = parse_line(CAST_PLAIN_LINE, "Renzik").expect("should parse");
        match e {
            Event::Cast { ability_id, power, .. } => {
                assert_eq!(ability_id, 13877);
                assert_eq!(power, None);
            }
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn parses_direct_and_periodic_damage() {
        let direct = parse_line(DAMAGE_LINE, "Renzik").expect("should parse");
        match direct {
            Event::Damage { ability_id, target_id, is_periodic, .. } => {
                assert_eq!(ability_id, 271881);
                assert_eq!(target_id, "Creature-0-4372-ABCD-001");
                assert!(!is_periodic);
            }
            other => panic!("Wrong variant: {:?}", other),
        }

        let tick = parse_line(PERIODIC_LINE, "Renzik").expect("should parse");
        match tick {
            Event::Damage { is_periodic, .. } => assert!(is_periodic),
            other => panic!("Wrong variant: {:?}", other),
        }
    }

    #[test]
    fn matches_actor_by_guid_too() {
        assert!(parse_line(DAMAGE_LINE, "Player-1234-ABCDEF").is_some());
    }

    #[test]
    fn skips_other_actors() {
        assert!(parse_line(OTHER_ACTOR_LINE, "Renzik").is_none());
    }

    #[test]
    fn returns_none_for_garbage() {
        assert!(parse_line("not a log line", "Renzik").is_none());
        assert!(parse_line("", "Renzik").is_none());
    }

    #[test]
    fn skips_unrecognized_subevents() {
        let raw = r#"5/21 20:14:40.000  SPELL_AURA_APPLIED,0,Player-1234-ABCDEF,"Renzik",0x511,0x0,Creature-0-4372-ABCD-001,"Grunt",0xa48,0x0,13877,"Blade Flurry",0x1,BUFF"#;
        assert!(parse_line(raw, "Renzik").is_none());
    }
}
