//! Relation build configuration that callers can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationConfig {
    /// Re-check index fidelity after every configured build.
    pub verify_indices: bool,

    /// Emit a debug summary of each configured `build` (needs the `tracing`
    /// feature). Per-index trace events do not depend on this flag.
    pub trace_index_builds: bool,
}

impl RelationConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TRIREL_VERIFY_INDICES`: verify indices after `build`
    /// - `TRIREL_TRACE_INDEX_BUILDS`: trace index builds
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TRIREL_VERIFY_INDICES") {
            if let Some(v) = parse_flag(&s) {
                cfg.verify_indices = v;
            }
        }

        if let Ok(s) = std::env::var("TRIREL_TRACE_INDEX_BUILDS") {
            if let Some(v) = parse_flag(&s) {
                cfg.trace_index_builds = v;
            }
        }

        cfg
    }

    /// Parse a JSON-serialized config; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let cfg = RelationConfig::default();
        assert!(!cfg.verify_indices);
        assert!(!cfg.trace_index_builds);
    }

    #[test]
    fn flags_parse_loosely() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn env_overrides_defaults() {
        std::env::set_var("TRIREL_VERIFY_INDICES", "yes");
        std::env::set_var("TRIREL_TRACE_INDEX_BUILDS", "bogus");
        let cfg = RelationConfig::from_env();
        std::env::remove_var("TRIREL_VERIFY_INDICES");
        std::env::remove_var("TRIREL_TRACE_INDEX_BUILDS");
        assert!(cfg.verify_indices);
        assert!(!cfg.trace_index_builds);
    }

    #[test]
    fn json_fills_missing_fields() {
        let cfg = RelationConfig::from_json(r#"{"verify_indices": true}"#).unwrap();
        assert!(cfg.verify_indices);
        assert!(!cfg.trace_index_builds);
    }

    #[test]
    fn bad_json_is_config_error() {
        let err = RelationConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
