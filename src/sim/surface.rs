//! Procedurally extended walkway
//!
//! An append-only sequence of tile types indexed by position. The generated
//! horizon is lazily pushed ahead of the player so the step-cue lookup never
//! runs off the end. The surface outlives individual runs; `clear` exists
//! only for a full teardown.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SURFACE_EXPAND_AHEAD, SURFACE_SAFETY_MARGIN};

/// Walkway tile material, selecting the step-cue family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Concrete,
    Grass,
    Metal,
}

/// Palette sampled from on each expansion
pub const TILE_PALETTE: [Tile; 3] = [Tile::Concrete, Tile::Grass, Tile::Metal];

impl Tile {
    /// Name used in step-cue asset paths
    pub fn cue_name(&self) -> &'static str {
        match self {
            Tile::Concrete => "concrete",
            Tile::Grass => "grass",
            Tile::Metal => "metal",
        }
    }
}

/// Append-only tile sequence
#[derive(Debug, Clone, Default)]
pub struct Surface {
    tiles: Vec<Tile>,
}

impl Surface {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Tile at a position, or `None` beyond the generated horizon
    pub fn tile_at(&self, position: u32) -> Option<Tile> {
        self.tiles.get(position as usize).copied()
    }

    /// Furthest generated position (exclusive)
    pub fn horizon(&self) -> u32 {
        self.tiles.len() as u32
    }

    /// Append `max - min + 1` copies of `tile`
    pub fn append_range(&mut self, min: u32, max: u32, tile: Tile) {
        for _ in min..=max {
            self.tiles.push(tile);
        }
    }

    /// Keep the horizon at least [`SURFACE_SAFETY_MARGIN`] tiles ahead of
    /// the player, extending to `player_pos + SURFACE_EXPAND_AHEAD` with a
    /// randomly chosen palette tile. No-op when the margin already holds.
    pub fn expand(&mut self, player_pos: u32, rng: &mut Pcg32) {
        if self.horizon().saturating_sub(player_pos) >= SURFACE_SAFETY_MARGIN {
            return;
        }
        let tile = TILE_PALETTE[rng.random_range(0..TILE_PALETTE.len())];
        let target = player_pos + SURFACE_EXPAND_AHEAD;
        while self.horizon() < target {
            self.tiles.push(tile);
        }
    }

    /// Drop all generated tiles (full teardown only, not per-run reset)
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
