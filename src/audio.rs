//! Audio cue cache over the Web Audio API
//!
//! Cue files are fetched and decoded once, then replayed from the cached
//! [`AudioBuffer`]. The tick loop fires cues and moves on: decoding happens
//! in a spawned task, and a per-key pending claim guarantees at most one
//! in-flight decode per cue even when the tick loop and the click handler
//! request the same uncached key back to back. A failed fetch or decode is
//! logged, the claim is dropped so a later play can retry, and that one
//! playback is skipped.

use crate::sim::{GameEvent, Tile};

/// A short audio feedback event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Footstep; tile picks the family, variant the recording
    Step { tile: Tile, variant: u8 },
    /// Scare landed
    ScareSuccess,
    /// Scare attempted out of reach
    ScareFail,
    /// One step away from the fly
    NearMiss,
}

impl Cue {
    /// Asset path used as the cache key
    pub fn asset_path(&self) -> String {
        match self {
            Cue::Step { tile, variant } => {
                format!("sounds/step-{}{}.mp3", tile.cue_name(), variant + 1)
            }
            Cue::ScareSuccess => "sounds/jump.mp3".to_string(),
            Cue::ScareFail => "sounds/buzz.mp3".to_string(),
            Cue::NearMiss => "sounds/close.mp3".to_string(),
        }
    }

    /// Cue for a sim event, if the event is audible
    pub fn from_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Step { tile, variant } => Some(Cue::Step {
                tile: *tile,
                variant: *variant,
            }),
            GameEvent::NearMiss => Some(Cue::NearMiss),
            GameEvent::ScareSuccess => Some(Cue::ScareSuccess),
            GameEvent::ScareFail => Some(Cue::ScareFail),
            GameEvent::ScoreAnnouncement { .. } | GameEvent::GameOver { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod cache {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{AudioBuffer, AudioContext, Response};

    use super::Cue;

    /// Decode status of a cue key
    enum CueSlot {
        /// A decode task owns this key; don't start another
        Pending,
        Ready(AudioBuffer),
    }

    /// Cache of decoded, replayable cue buffers
    pub struct CueCache {
        ctx: Option<AudioContext>,
        slots: Rc<RefCell<HashMap<String, CueSlot>>>,
    }

    impl Default for CueCache {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CueCache {
        pub fn new() -> Self {
            // May fail outside a secure context; the cache then stays silent
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                slots: Rc::new(RefCell::new(HashMap::new())),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Trigger playback of a cue; never blocks the caller
        pub fn play(&self, cue: Cue) {
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let key = cue.asset_path();
            {
                let mut slots = self.slots.borrow_mut();
                match slots.get(&key) {
                    Some(CueSlot::Ready(buffer)) => {
                        start_buffer(ctx, buffer);
                        return;
                    }
                    // Decode already in flight; skip this playback
                    Some(CueSlot::Pending) => return,
                    None => {
                        slots.insert(key.clone(), CueSlot::Pending);
                    }
                }
            }

            let ctx = ctx.clone();
            let slots = self.slots.clone();
            spawn_local(async move {
                match fetch_and_decode(&ctx, &key).await {
                    Ok(buffer) => {
                        start_buffer(&ctx, &buffer);
                        slots.borrow_mut().insert(key, CueSlot::Ready(buffer));
                    }
                    Err(e) => {
                        log::warn!("cue {key} unavailable: {e:?}");
                        slots.borrow_mut().remove(&key);
                    }
                }
            });
        }
    }

    /// Fetch raw bytes for a cue and decode them to a buffer
    async fn fetch_and_decode(ctx: &AudioContext, key: &str) -> Result<AudioBuffer, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(key)).await?.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "fetch failed with status {}",
                response.status()
            )));
        }
        let bytes = JsFuture::from(response.array_buffer()?).await?;
        let decoded = JsFuture::from(ctx.decode_audio_data(&bytes.dyn_into()?)?).await?;
        decoded.dyn_into()
    }

    /// Schedule one playback from a decoded buffer, fire-and-forget
    fn start_buffer(ctx: &AudioContext, buffer: &AudioBuffer) {
        let Ok(source) = ctx.create_buffer_source() else {
            return;
        };
        source.set_buffer(Some(buffer));
        if source.connect_with_audio_node(&ctx.destination()).is_ok() {
            let _ = source.start();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use cache::CueCache;

/// Native stub; the sim never needs audible output
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct CueCache;

#[cfg(not(target_arch = "wasm32"))]
impl CueCache {
    pub fn new() -> Self {
        Self
    }

    pub fn resume(&self) {}

    pub fn play(&self, cue: Cue) {
        log::debug!("cue: {}", cue.asset_path());
    }
}
