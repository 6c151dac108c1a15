//! Runtime configuration read from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_STATS_PATH` | stats JSON file | XDG data dir, then `~/.local/share`, then `./` |
//! | `BLOCKFALL_LOG_PATH` | log file (logging is off without it) | none |
//! | `BLOCKFALL_LOG_LEVEL` | `error`..`trace` | `info` |
//! | `BLOCKFALL_SEED` | piece sequence seed | OS entropy |
//! | `BLOCKFALL_GAMEPAD_COOLDOWN_MS` | gamepad re-fire window | `120` |
//!
//! Values that fail to parse fall back to the default.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::stats::{resolve_path, STATS_PATH_ENV};
use crate::types::DEFAULT_GAMEPAD_COOLDOWN_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub stats_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
    pub seed: Option<u64>,
    pub gamepad_cooldown_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let stats_path = resolve_path(
            non_empty(STATS_PATH_ENV).map(Into::into),
            non_empty("XDG_DATA_HOME").map(Into::into),
            non_empty("HOME").map(Into::into),
        );

        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let log_level = non_empty("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| Level::from_str(&s).ok())
            .unwrap_or(Level::INFO);

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        let gamepad_cooldown_ms = non_empty("BLOCKFALL_GAMEPAD_COOLDOWN_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_GAMEPAD_COOLDOWN_MS);

        Self {
            stats_path,
            log_path,
            log_level,
            seed,
            gamepad_cooldown_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.stats_path, PathBuf::from("blockfall-stats.json"));
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_level, Level::INFO);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.gamepad_cooldown_ms, 120);
    }

    #[test]
    fn test_explicit_values() {
        let cfg = config(&[
            ("BLOCKFALL_STATS_PATH", "/tmp/s.json"),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
            ("BLOCKFALL_LOG_LEVEL", "debug"),
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_GAMEPAD_COOLDOWN_MS", "150"),
        ]);
        assert_eq!(cfg.stats_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(cfg.log_level, Level::DEBUG);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.gamepad_cooldown_ms, 150);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[
            ("BLOCKFALL_LOG_LEVEL", "chatty"),
            ("BLOCKFALL_SEED", "abc"),
            ("BLOCKFALL_GAMEPAD_COOLDOWN_MS", "-5"),
            ("BLOCKFALL_LOG_PATH", "   "),
            ("HOME", "/home/player"),
        ]);
        assert_eq!(cfg.log_level, Level::INFO);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.gamepad_cooldown_ms, 120);
        assert_eq!(cfg.log_path, None);
        assert_eq!(
            cfg.stats_path,
            PathBuf::from("/home/player/.local/share/blockfall/stats.json")
        );
    }
}
