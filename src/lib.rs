//! Scarefly - an audio-first reflex game
//!
//! A fly flees along a one-dimensional walkway while the player's footsteps
//! close in at a difficulty-scaled pace. Clicking "scares" the fly further
//! away but also speeds the player up; catching up to the fly ends the run.
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (stopwatch, difficulty, surface, tick engine)
//! - `audio`: Decoded-cue cache over the Web Audio API
//! - `scores`: Past-run score ledger persisted to LocalStorage
//! - `config`: Per-run configuration read from the start dialog

pub mod audio;
pub mod config;
pub mod scores;
pub mod sim;

pub use config::RunConfig;
pub use scores::ScoreLedger;

/// Game tuning constants
pub mod consts {
    /// Reach (in tiles) within which a scare action succeeds
    pub const SCARE_REACH: u32 = 2;
    /// Player-to-target gap that triggers the near-miss cue
    pub const NEAR_MISS_GAP: u32 = 2;

    /// Minimum tiles of generated surface kept ahead of the player
    pub const SURFACE_SAFETY_MARGIN: u32 = 5;
    /// How far past the player each surface expansion reaches
    pub const SURFACE_EXPAND_AHEAD: u32 = 20;

    /// Step cue variants recorded per tile type
    pub const STEP_VARIANTS: u8 = 5;

    /// Floor for the move interval; successive scares can never push the
    /// player below one step per 60ms
    pub const MIN_MOVE_INTERVAL_MS: f64 = 60.0;

    /// Score announcement cadence when the input is unset or invalid
    pub const DEFAULT_ANNOUNCE_INTERVAL: u32 = 5;
}
