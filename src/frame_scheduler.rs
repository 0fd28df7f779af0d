//! Fixed-rate pacing of station ticks.
//!
//! No async and no platform timer: the caller sleeps for the returned
//! duration between ticks.

use embassy_time::{Duration, Instant};

use crate::{ErrorReporter, OutputDriver, Station};

/// Default target frame rate (50 FPS, a 20 ms frame).
pub const DEFAULT_FPS: u32 = 50;

pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Frames of lag tolerated before the backlog is skipped
const MAX_DRIFT_FRAMES: u32 = 2;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Drives a [`Station`] at a fixed frame rate with drift correction.
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(station);
///
/// loop {
///     scheduler.station_mut().process_commands(&COMMANDS);
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver, R: ErrorReporter> {
    station: Station<O, R>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<O: OutputDriver, R: ErrorReporter> FrameScheduler<O, R> {
    /// Uses `DEFAULT_FRAME_DURATION` for frame timing.
    pub fn new(station: Station<O, R>) -> Self {
        Self::with_frame_duration(station, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(station: Station<O, R>, frame_duration: Duration) -> Self {
        Self {
            station,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Tick the station once and return when the next frame is due.
    ///
    /// When more than two frames behind, the deadline restarts at `now`
    /// instead of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * MAX_DRIFT_FRAMES;
        if now > self.next_frame + max_drift {
            log::debug!(
                "station: {} ms behind, resetting frame deadline",
                (now - self.next_frame).as_millis()
            );
            self.next_frame = now;
        }

        self.station.tick(now);

        self.next_frame += self.frame_duration;
        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub const fn station(&self) -> &Station<O, R> {
        &self.station
    }

    pub fn station_mut(&mut self) -> &mut Station<O, R> {
        &mut self.station
    }

    pub fn into_station(self) -> Station<O, R> {
        self.station
    }
}
