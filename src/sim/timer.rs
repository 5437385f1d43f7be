//! Wall-clock stopwatch gating the tick engine
//!
//! Time is injected by the caller (the RAF timestamp in the browser,
//! synthetic values in tests), so the sim never reads a clock itself.

/// Elapsed-time stopwatch with pause/resume
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_ms: f64,
    elapsed_ms: f64,
    paused: bool,
}

impl Stopwatch {
    /// Start a stopwatch at the given timestamp
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            elapsed_ms: 0.0,
            paused: false,
        }
    }

    /// Refresh the elapsed reading; no-op while paused, so the reported
    /// elapsed time freezes at the last value observed before the pause
    pub fn update(&mut self, now_ms: f64) {
        if !self.paused {
            self.elapsed_ms = now_ms - self.start_ms;
        }
    }

    /// Reset the measurement origin without changing the paused state
    pub fn restart(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.elapsed_ms = 0.0;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Last observed elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}
