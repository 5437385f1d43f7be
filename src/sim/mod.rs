//! Deterministic gameplay module
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Time injected as milliseconds, never read from the environment
//! - Seeded RNG only
//! - No DOM, audio, or platform dependencies
//!
//! Side effects are reported as [`state::GameEvent`]s for the shell to act on.

pub mod difficulty;
pub mod state;
pub mod surface;
pub mod tick;
pub mod timer;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use state::{GameEvent, GamePhase, GameSession, Player, Target, collide, near_miss};
pub use surface::{Surface, Tile};
pub use tick::{scare, tick};
pub use timer::Stopwatch;
