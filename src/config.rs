//! Per-run configuration
//!
//! Read once from the start dialog when a run begins. Bad input is never an
//! error: unknown difficulty labels fall back to the baseline tier and an
//! unparseable announcement interval falls back to the default.

use crate::consts::DEFAULT_ANNOUNCE_INTERVAL;
use crate::sim::Difficulty;

/// Settings for one run
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    /// Whether to announce the score in the transient message region
    pub announce_enabled: bool,
    /// Announce every Nth point
    pub announce_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            announce_enabled: false,
            announce_every: DEFAULT_ANNOUNCE_INTERVAL,
        }
    }
}

impl RunConfig {
    /// Build a config from raw dialog input values
    pub fn from_inputs(difficulty_label: &str, announce_enabled: bool, interval_input: &str) -> Self {
        Self {
            difficulty: Difficulty::from_label(difficulty_label),
            announce_enabled,
            announce_every: parse_announce_interval(interval_input),
        }
    }
}

/// Parse the announcement interval, substituting the default for anything
/// that is not a positive integer
pub fn parse_announce_interval(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_ANNOUNCE_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_announce_interval() {
        assert_eq!(parse_announce_interval("3"), 3);
        assert_eq!(parse_announce_interval(" 12 "), 12);
        assert_eq!(parse_announce_interval("0"), DEFAULT_ANNOUNCE_INTERVAL);
        assert_eq!(parse_announce_interval(""), DEFAULT_ANNOUNCE_INTERVAL);
        assert_eq!(parse_announce_interval("five"), DEFAULT_ANNOUNCE_INTERVAL);
        assert_eq!(parse_announce_interval("-2"), DEFAULT_ANNOUNCE_INTERVAL);
    }

    #[test]
    fn test_from_inputs_unknown_difficulty() {
        let config = RunConfig::from_inputs("Impossible", true, "7");
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert!(config.announce_enabled);
        assert_eq!(config.announce_every, 7);
    }
}
