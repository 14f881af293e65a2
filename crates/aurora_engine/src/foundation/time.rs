//! Time management utilities
//!
//! The simulation never reads the wall clock directly. It asks a [`Clock`]
//! for "now", which lets tests and the fixed-step driver run
//! deterministically with [`ManualClock`].

use std::time::{Duration, Instant};

/// Point in time as reported by a [`Clock`]
pub type ClockTime = Instant;

/// Monotonic clock abstraction consumed by the timer queue
pub trait Clock {
    /// Current time
    fn now(&self) -> ClockTime;

    /// Move the clock forward. Wall clocks ignore this.
    fn advance(&mut self, _delta: Duration) {}
}

/// Clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ClockTime {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Instant,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock starting at the current instant
    pub fn new() -> Self {
        Self { now: Instant::now() }
    }

    /// Create a clock starting at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self { now: start }
    }

    /// Advance by a number of seconds
    pub fn advance_secs(&mut self, secs: f32) {
        self.now += secs_to_duration(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> ClockTime {
        self.now
    }

    fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }
}

/// Convert seconds to a [`Duration`], clamping negatives to zero
pub fn secs_to_duration(secs: f32) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f32(secs)
    } else {
        Duration::ZERO
    }
}

/// Convert a [`Duration`] to seconds
pub fn duration_to_secs(duration: Duration) -> f32 {
    duration.as_secs_f32()
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}
