//! Difficulty tiers and their tuning profiles
//!
//! Tiers are hand-tuned, not points on a single scale: each one overrides
//! the baseline scalars independently (Hard even caps the max move-time cut
//! below the baseline while sextupling the min). The profile is recomputed
//! from scratch on every call rather than cached per run.

use serde::{Deserialize, Serialize};

/// Named difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a tier label; anything unrecognized falls back to the baseline
    pub fn from_label(s: &str) -> Self {
        match s {
            "Medium" => Difficulty::Medium,
            "Hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

/// Tuning scalars derived from a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Smallest interval cut per successful scare (ms)
    pub move_time_min: u32,
    /// Largest interval cut per successful scare (ms)
    pub move_time_max: u32,
    /// Smallest distance the fly jumps when scared (tiles)
    pub gap_min: u32,
    /// Largest distance the fly jumps when scared (tiles)
    pub gap_max: u32,
    /// Move interval at run start (ms)
    pub initial_interval_ms: u32,
}

impl DifficultyProfile {
    /// Resolve a tier to its profile. Pure: same tier, same scalars.
    pub fn resolve(difficulty: Difficulty) -> Self {
        let baseline = Self {
            move_time_min: 5,
            move_time_max: 10,
            gap_min: 5,
            gap_max: 20,
            initial_interval_ms: 680,
        };

        match difficulty {
            Difficulty::Easy => baseline,
            Difficulty::Medium => Self {
                move_time_min: baseline.move_time_min * 2,
                move_time_max: baseline.move_time_max * 4,
                gap_min: baseline.gap_min - 1,
                gap_max: (baseline.gap_max as f32 * 1.75) as u32,
                initial_interval_ms: 480,
            },
            Difficulty::Hard => Self {
                move_time_min: baseline.move_time_min * 6,
                // Capped constant, NOT scaled: Hard takes many small cuts
                move_time_max: 8,
                gap_min: baseline.gap_min - 2,
                gap_max: (baseline.gap_max as f32 * 2.5) as u32,
                initial_interval_ms: 340,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_interval_monotonic() {
        let easy = DifficultyProfile::resolve(Difficulty::Easy);
        let medium = DifficultyProfile::resolve(Difficulty::Medium);
        let hard = DifficultyProfile::resolve(Difficulty::Hard);
        assert!(easy.initial_interval_ms > medium.initial_interval_ms);
        assert!(medium.initial_interval_ms > hard.initial_interval_ms);
    }

    #[test]
    fn test_medium_profile_constants() {
        let p = DifficultyProfile::resolve(Difficulty::Medium);
        assert_eq!(p.move_time_min, 10);
        assert_eq!(p.move_time_max, 40);
        assert_eq!(p.gap_min, 4);
        assert_eq!(p.gap_max, 35);
        assert_eq!(p.initial_interval_ms, 480);
    }

    #[test]
    fn test_hard_caps_move_time_max() {
        let p = DifficultyProfile::resolve(Difficulty::Hard);
        assert_eq!(p.move_time_min, 30);
        assert_eq!(p.move_time_max, 8);
        assert_eq!(p.gap_min, 3);
        assert_eq!(p.gap_max, 50);
        assert_eq!(p.initial_interval_ms, 340);
    }

    #[test]
    fn test_unknown_label_falls_back_to_baseline() {
        assert_eq!(Difficulty::from_label("Nightmare"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label(""), Difficulty::Easy);
        let p = DifficultyProfile::resolve(Difficulty::from_label("???"));
        assert_eq!(p.initial_interval_ms, 680);
    }
}
