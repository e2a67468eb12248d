//! Monotonic frame timer.

use std::time::Instant;

/// Start/stop stopwatch over the monotonic clock.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
    stop: Instant,
}

impl Timer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, stop: now }
    }

    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    pub fn stop(&mut self) {
        self.stop = Instant::now();
    }

    /// Seconds between the last start and stop marks.
    pub fn elapsed(&self) -> f64 {
        self.stop.saturating_duration_since(self.start).as_secs_f64()
    }

    /// Begin the next interval where the previous one ended.
    pub fn restart(&mut self) {
        self.start = self.stop;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames per second for a frame time, guarded against a zero interval.
pub fn frame_rate(frame_time: f64) -> f64 {
    if frame_time > 0.0 {
        1.0 / frame_time
    } else {
        0.0
    }
}
