/// Timing helpers for the frame loop and the optional call counters.
pub mod profiling;

pub use profiling::{CounterSnapshot, RenderCounters, RENDER_COUNTERS};

use std::time::{Duration, Instant};
use tracing::debug;

/// Logs how long a scope took when dropped.
pub struct PerfTimer {
    name: &'static str,
    start: Instant,
}

impl PerfTimer {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed_us = self.elapsed().as_micros() as u64;
        debug!(scope = self.name, elapsed_us, "perf");
    }
}

/// Rolling frames-per-second estimate, updated once per presented frame.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            fps: 0.0,
        }
    }

    /// Mark a frame boundary and return the instantaneous rate.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        if delta > Duration::ZERO {
            self.fps = 1.0 / delta.as_secs_f64();
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time the rest of the enclosing scope.
#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        let _timer = $crate::perf::PerfTimer::new($name);
    };
}
