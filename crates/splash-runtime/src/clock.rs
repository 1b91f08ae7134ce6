//! Frame clock producing per-frame deltas

use std::time::Instant;

/// Tracks wall-clock time between frames
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Longest delta a single frame may report (default: 250ms).
    /// Negative or NaN acts as zero.
    pub max_frame_time: f64,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_frame_time: 0.25,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom frame-time clamp. Negative or NaN becomes zero.
    pub fn with_max_frame_time(seconds: f64) -> Self {
        Self {
            max_frame_time: seconds.max(0.0),
            ..Self::default()
        }
    }

    /// Advance the clock from the wall clock. Call once per frame.
    ///
    /// The first tick reports a zero delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.tick_with(0.0);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.tick_with(elapsed)
    }

    /// Advance the clock by an explicit delta (replays, tests).
    ///
    /// Negative or NaN deltas count as zero; long frames are clamped to `max_frame_time`.
    pub fn tick_with(&mut self, elapsed: f64) -> f64 {
        // f64::max ignores NaN
        let limit = self.max_frame_time.max(0.0);
        self.delta_time = elapsed.max(0.0).min(limit);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }
}
