//! Session state and entity types
//!
//! A [`GameSession`] owns everything scoped to one run (player, target,
//! stopwatch, RNG, phase). Longer-lived services - the surface and the cue
//! cache - live in the shell and are passed in where needed, so discarding
//! a session can never leak run state into the next one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, DifficultyProfile};
use super::surface::Tile;
use super::timer::Stopwatch;
use crate::config::RunConfig;
use crate::consts::NEAR_MISS_GAP;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start dialog open, nothing ticking
    Idle,
    /// Active run
    Running,
    /// Run ended by collision
    GameOver,
}

/// The advancing player token
#[derive(Debug, Clone)]
pub struct Player {
    pub position: u32,
    pub move_interval_ms: f64,
    pub score: u32,
}

/// The fleeing fly
#[derive(Debug, Clone)]
pub struct Target {
    pub position: u32,
    pub spawned: bool,
}

/// Exact-position collision
pub fn collide(player: &Player, target: &Target) -> bool {
    player.position == target.position
}

/// True one step short of where a collision could happen next
pub fn near_miss(player: &Player, target: &Target) -> bool {
    player.position + NEAR_MISS_GAP == target.position
}

/// Effects the sim asks the shell to perform
///
/// The tick engine never touches audio or the DOM; it records events here
/// and the shell drains them after every tick or scare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Footstep landed on a tile; play the matching step-cue variant
    Step { tile: Tile, variant: u8 },
    /// Player is one step behind the fly
    NearMiss,
    /// Scare landed; fly relocated
    ScareSuccess,
    /// Scare attempted out of reach
    ScareFail,
    /// Periodic score callout for the transient message region
    ScoreAnnouncement { score: u32 },
    /// Collision; run is over
    GameOver { score: u32 },
}

/// One run's worth of mutable game state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub player: Player,
    pub target: Target,
    pub timer: Stopwatch,
    pub config: RunConfig,
    pub(super) rng: Pcg32,
    /// Last step variant played, excluded from the next sample
    pub(super) last_step_variant: Option<u8>,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session; nothing moves until [`GameSession::start_run`]
    pub fn new(config: RunConfig, seed: u64) -> Self {
        let profile = DifficultyProfile::resolve(config.difficulty);
        Self {
            phase: GamePhase::Idle,
            player: Player {
                position: 0,
                move_interval_ms: profile.initial_interval_ms as f64,
                score: 0,
            },
            target: Target {
                position: 0,
                spawned: false,
            },
            timer: Stopwatch::new(0.0),
            config,
            rng: Pcg32::seed_from_u64(seed),
            last_step_variant: None,
            events: Vec::new(),
        }
    }

    /// Begin a run (from Idle, or from GameOver for a replay with the same
    /// settings): re-derive the interval from the difficulty profile, reset
    /// position and score, respawn the fly a random gap ahead, and restart
    /// the stopwatch.
    pub fn start_run(&mut self, now_ms: f64) {
        let profile = DifficultyProfile::resolve(self.config.difficulty);
        self.player.position = 0;
        self.player.score = 0;
        self.player.move_interval_ms = profile.initial_interval_ms as f64;
        self.target.position = self.rng.random_range(profile.gap_min..=profile.gap_max);
        self.target.spawned = true;
        self.timer = Stopwatch::new(now_ms);
        self.last_step_variant = None;
        self.phase = GamePhase::Running;
        log::info!(
            "run started: difficulty={} target at {} interval {}ms",
            self.config.difficulty.as_str(),
            self.target.position,
            self.player.move_interval_ms
        );
    }

    /// Difficulty profile for this session, recomputed on demand
    pub fn profile(&self) -> DifficultyProfile {
        DifficultyProfile::resolve(self.config.difficulty)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
