// Frame Clock
// Accumulates host frame deltas into simulation time

/// Simulation clock driven by the host's per-frame update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    /// Seconds of simulation time elapsed
    now: f64,
    /// Number of advances applied
    frames: u64,
    locked: bool,
}

impl FrameClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at `now` seconds
    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance by one frame of `delta` seconds
    ///
    /// Returns false if the clock is locked or `delta` is negative or not
    /// finite.
    pub fn advance(&mut self, delta: f64) -> bool {
        if self.locked {
            return false;
        }
        if !delta.is_finite() || delta < 0.0 {
            log::warn!("ignoring invalid frame delta {}", delta);
            return false;
        }

        self.now += delta;
        self.frames += 1;
        true
    }

    /// Freeze simulation time
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Resume simulation time
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Check if time is frozen
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
