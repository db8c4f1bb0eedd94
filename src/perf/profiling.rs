/// Global call counters for profiling builds.
/// The macros compile to nothing unless the `profiling` feature is on.
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RenderCounters {
    // Rasterization
    pub triangles_submitted: AtomicU64,
    pub triangles_behind_camera: AtomicU64,
    pub triangles_rejected: AtomicU64,
    pub pixels_tested: AtomicU64,
    pub depth_passed: AtomicU64,
    pub depth_failed: AtomicU64,

    // Image
    pub image_clears: AtomicU64,

    // Terrain
    pub chunks_generated: AtomicU64,
    pub chunks_evicted: AtomicU64,
}

impl RenderCounters {
    pub const fn new() -> Self {
        Self {
            triangles_submitted: AtomicU64::new(0),
            triangles_behind_camera: AtomicU64::new(0),
            triangles_rejected: AtomicU64::new(0),
            pixels_tested: AtomicU64::new(0),
            depth_passed: AtomicU64::new(0),
            depth_failed: AtomicU64::new(0),
            image_clears: AtomicU64::new(0),
            chunks_generated: AtomicU64::new(0),
            chunks_evicted: AtomicU64::new(0),
        }
    }

    pub fn reset(&self) {
        for counter in self.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn all(&self) -> [&AtomicU64; 9] {
        [
            &self.triangles_submitted,
            &self.triangles_behind_camera,
            &self.triangles_rejected,
            &self.pixels_tested,
            &self.depth_passed,
            &self.depth_failed,
            &self.image_clears,
            &self.chunks_generated,
            &self.chunks_evicted,
        ]
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            triangles_submitted: self.triangles_submitted.load(Ordering::Relaxed),
            triangles_behind_camera: self.triangles_behind_camera.load(Ordering::Relaxed),
            triangles_rejected: self.triangles_rejected.load(Ordering::Relaxed),
            pixels_tested: self.pixels_tested.load(Ordering::Relaxed),
            depth_passed: self.depth_passed.load(Ordering::Relaxed),
            depth_failed: self.depth_failed.load(Ordering::Relaxed),
            image_clears: self.image_clears.load(Ordering::Relaxed),
            chunks_generated: self.chunks_generated.load(Ordering::Relaxed),
            chunks_evicted: self.chunks_evicted.load(Ordering::Relaxed),
        }
    }
}

impl Default for RenderCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub triangles_submitted: u64,
    pub triangles_behind_camera: u64,
    pub triangles_rejected: u64,
    pub pixels_tested: u64,
    pub depth_passed: u64,
    pub depth_failed: u64,
    pub image_clears: u64,
    pub chunks_generated: u64,
    pub chunks_evicted: u64,
}

impl CounterSnapshot {
    /// Share of depth tests that passed, if any ran.
    pub fn depth_pass_rate(&self) -> Option<f64> {
        let attempts = self.depth_passed + self.depth_failed;
        (attempts > 0).then(|| self.depth_passed as f64 / attempts as f64)
    }

    pub fn log_report(&self) {
        tracing::info!(
            triangles = self.triangles_submitted,
            behind_camera = self.triangles_behind_camera,
            rejected = self.triangles_rejected,
            pixels_tested = self.pixels_tested,
            depth_passed = self.depth_passed,
            depth_failed = self.depth_failed,
            clears = self.image_clears,
            chunks_generated = self.chunks_generated,
            chunks_evicted = self.chunks_evicted,
            "render counters"
        );
    }
}

pub static RENDER_COUNTERS: RenderCounters = RenderCounters::new();

#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_rate_needs_attempts() {
        let snapshot = CounterSnapshot::default();
        assert_eq!(snapshot.depth_pass_rate(), None);

        let snapshot = CounterSnapshot {
            depth_passed: 3,
            depth_failed: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.depth_pass_rate(), Some(0.75));
    }

    #[test]
    fn reset_zeroes_counters() {
        let counters = RenderCounters::new();
        counters.pixels_tested.fetch_add(5, Ordering::Relaxed);
        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }
}
