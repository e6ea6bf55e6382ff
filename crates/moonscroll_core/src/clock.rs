//! Frame clock
//!
//! Monotonic elapsed-time counter sampled once per frame.

use std::time::{Duration, Instant};

/// Largest delta reported by a single sample
///
/// Keeps the first frame and frames after a stall (window drag, focus loss) from
/// producing a huge step.
pub const MAX_DELTA: f32 = 0.25;

/// Monotonic frame clock
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    elapsed: f32,
    delta: f32,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock starting at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            elapsed: 0.0,
            delta: 0.0,
            frames: 0,
        }
    }

    /// Sample the clock for a new frame, returning the capped delta in seconds
    pub fn sample(&mut self) -> f32 {
        self.sample_at(Instant::now())
    }

    /// Sample the clock at an explicit instant
    ///
    /// Instants earlier than the previous sample yield a zero delta.
    pub fn sample_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last).as_secs_f32();
        self.delta = raw.min(MAX_DELTA);
        self.last = self.last.max(now);
        self.elapsed = self.last.duration_since(self.start).as_secs_f32();
        self.frames += 1;
        self.delta
    }

    /// Seconds between the clock start and the latest sample
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Capped delta of the latest sample
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Number of samples taken
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Restart at `now` with a zero elapsed time
    pub fn reset(&mut self, now: Instant) {
        *self = Self::starting_at(now);
    }

    /// Wall time since the clock started, independent of sampling
    pub fn since_start(&self) -> Duration {
        self.start.elapsed()
    }
}
