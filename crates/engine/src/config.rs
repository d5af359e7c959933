//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use flummi_core::types::TICK_MS;

const DEFAULT_JOIN_TIMEOUT_MS: u64 = 2000;
const DEFAULT_SCORE_PATH: &str = "flummi-scores.json";

/// Timing parameters of a [`GameLoop`](crate::GameLoop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Target delay between the starts of two ticks.
    pub tick: Duration,
    /// Bounded wait for the loop thread in `stop()`.
    pub join_timeout: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            join_timeout: Duration::from_millis(DEFAULT_JOIN_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub level: u32,
    pub level_dir: Option<PathBuf>,
    pub tick_ms: u64,
    pub join_timeout_ms: u64,
    pub score_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: 1,
            level_dir: None,
            tick_ms: TICK_MS as u64,
            join_timeout_ms: DEFAULT_JOIN_TIMEOUT_MS,
            score_path: PathBuf::from(DEFAULT_SCORE_PATH),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Read `FLUMMI_*` variables; anything missing or unparseable keeps its
    /// default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let level = text("FLUMMI_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.level);
        let tick_ms = text("FLUMMI_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.tick_ms);
        let join_timeout_ms = text("FLUMMI_JOIN_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.join_timeout_ms);
        let score_path = text("FLUMMI_SCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.score_path);

        Self {
            level,
            level_dir: text("FLUMMI_LEVEL_DIR").map(PathBuf::from),
            tick_ms,
            join_timeout_ms,
            score_path,
            log_path: text("FLUMMI_LOG_PATH").map(PathBuf::from),
        }
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            tick: Duration::from_millis(self.tick_ms),
            join_timeout: Duration::from_millis(self.join_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let c = GameConfig::from_lookup(|_| None);
        assert_eq!(c, GameConfig::default());
        assert_eq!(c.loop_config(), LoopConfig::default());
        assert_eq!(c.loop_config().tick, Duration::from_millis(30));
    }

    #[test]
    fn reads_overrides() {
        let c = GameConfig::from_lookup(lookup(&[
            ("FLUMMI_LEVEL", "2"),
            ("FLUMMI_LEVEL_DIR", "/tmp/levels"),
            ("FLUMMI_TICK_MS", "16"),
            ("FLUMMI_JOIN_TIMEOUT_MS", "500"),
            ("FLUMMI_SCORE_PATH", "s.json"),
            ("FLUMMI_LOG_PATH", " /tmp/flummi.log "),
        ]));
        assert_eq!(c.level, 2);
        assert_eq!(c.level_dir, Some(PathBuf::from("/tmp/levels")));
        assert_eq!(c.tick_ms, 16);
        assert_eq!(c.join_timeout_ms, 500);
        assert_eq!(c.score_path, PathBuf::from("s.json"));
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/flummi.log")));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let c = GameConfig::from_lookup(lookup(&[
            ("FLUMMI_LEVEL", "two"),
            ("FLUMMI_TICK_MS", "0"),
            ("FLUMMI_LOG_PATH", "   "),
        ]));
        assert_eq!(c.level, 1);
        assert_eq!(c.tick_ms, 30);
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_game_config_from_env() {
        // Only checks that reading the real environment does not panic.
        let _config = GameConfig::from_env();
    }
}
