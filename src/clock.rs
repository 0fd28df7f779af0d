//! Frame clock shared by every channel of a station.
//!
//! The clock is advanced exactly once per render pass, before any effect
//! draws, so every particle and moving object in that pass observes the same
//! frame start and delta.

use embassy_time::{Duration, Instant};

/// Upper bound for a single frame delta.
///
/// Long stalls (blocking reconnects, clock jumps) would otherwise teleport
/// moving objects across the strip.
pub const MAX_FRAME_DELTA: Duration = Duration::from_secs(1);

const MICROS_PER_SECOND: f32 = 1_000_000.0;

/// Tracks the start of the current frame and the time since the previous one.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    frame_start: Instant,
    delta: Duration,
}

impl FrameClock {
    /// Create a clock whose first frame starts at `now` with a zero delta.
    pub const fn new(now: Instant) -> Self {
        Self {
            frame_start: now,
            delta: Duration::from_ticks(0),
        }
    }

    /// Start a new frame at `now`.
    ///
    /// A clock that moved backwards yields a zero delta instead of wrapping.
    pub fn advance(&mut self, now: Instant) {
        let delta = now
            .checked_duration_since(self.frame_start)
            .unwrap_or(Duration::from_ticks(0));
        self.delta = delta.min(MAX_FRAME_DELTA);
        self.frame_start = now;
    }

    /// Start time of the current frame
    pub const fn frame_start(&self) -> Instant {
        self.frame_start
    }

    /// Time elapsed between the previous and the current frame, clamped
    pub const fn delta(&self) -> Duration {
        self.delta
    }

    /// Frame delta in seconds
    #[allow(clippy::cast_precision_loss)]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_micros() as f32 / MICROS_PER_SECOND
    }

    /// Seconds from `since` to the current frame start.
    ///
    /// Instants after the frame start yield zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn seconds_since(&self, since: Instant) -> f32 {
        self.frame_start
            .checked_duration_since(since)
            .map_or(0.0, |elapsed| elapsed.as_micros() as f32 / MICROS_PER_SECOND)
    }
}
