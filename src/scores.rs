//! Past-run score ledger
//!
//! Append-only in insertion order, persisted to LocalStorage. Reads sort a
//! copy; the stored order is never rewritten.

use serde::{Deserialize, Serialize};

/// Ordered record of completed-run scores
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreLedger {
    pub scores: Vec<u32>,
}

impl ScoreLedger {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "scarefly_scores";

    pub fn new() -> Self {
        Self { scores: Vec::new() }
    }

    /// Record a completed run's score
    pub fn append(&mut self, score: u32) {
        self.scores.push(score);
    }

    /// Scores sorted best-first; does not mutate the stored order
    pub fn sorted_desc(&self) -> Vec<u32> {
        let mut view = self.scores.clone();
        view.sort_unstable_by(|a, b| b.cmp(a));
        view
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Load the ledger from LocalStorage (WASM only); an absent or corrupt
    /// entry is an empty ledger, never an error
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(ledger) = serde_json::from_str::<ScoreLedger>(&json) {
                    log::info!("Loaded {} past scores", ledger.scores.len());
                    return ledger;
                }
                log::warn!("Score ledger unreadable, starting fresh");
            }
        }

        Self::new()
    }

    /// Save the ledger to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Score ledger saved ({} entries)", self.scores.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
