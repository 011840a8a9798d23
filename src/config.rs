/// Analysis configuration — an optional TOML file next to the log.
///
/// Everything here can also be given on the command line; CLI values win.
/// A missing file yields the defaults, a malformed one is a real error.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Actor whose events are analyzed, by name or GUID.
    #[serde(default)]
    pub actor: String,

    /// Profile key, e.g. "ROGUE/Outlaw".
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_profile() -> String {
    "ROGUE/Outlaw".to_owned()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            actor:   String::new(),
            profile: default_profile(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_or_default(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let cfg: AnalysisConfig = toml::from_str(&raw)?;
        Ok(cfg)
    } else {
        Ok(AnalysisConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_a_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debrief.toml");
        std::fs::write(&path, "actor = \"Renzik\"\nprofile = \"DRUID/Feral\"\n").unwrap();

        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.actor, "Renzik");
        assert_eq!(cfg.profile, "DRUID/Feral");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debrief.toml");
        std::fs::write(&path, "actor = \"Renzik\"\n").unwrap();

        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.profile, "ROGUE/Outlaw");
    }

    #[test]
    fn returns_default_when_missing() {
        let dir = tempdir().unwrap();
        let cfg = load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert!(cfg.actor.is_empty());
        assert_eq!(cfg.profile, "ROGUE/Outlaw");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debrief.toml");
        std::fs::write(&path, "actor = [not toml").unwrap();
        assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
    }
}
