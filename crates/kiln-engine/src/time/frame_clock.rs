use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Exponentially smoothed frame time, in milliseconds.
    pub avg_ms: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

impl FrameTime {
    /// Raw frame time in milliseconds.
    #[inline]
    pub fn ms(&self) -> f32 {
        self.dt * 1000.0
    }
}

/// Produces `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// leak a multi-second frame into the averages.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    avg_ms: Option<f32>,
    dt_min: Duration,
    dt_max: Duration,
}

/// Weight of the newest sample in the moving average.
const SMOOTHING: f32 = 0.1;

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            avg_ms: None,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after the window was restored.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ms = dt.as_secs_f32() * 1000.0;
        let avg = match self.avg_ms {
            Some(prev) => prev + (ms - prev) * SMOOTHING,
            None => ms,
        };
        self.avg_ms = Some(avg);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            avg_ms: avg,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clamps_long_stall() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        let ft = clock.tick_at(start + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn tick_clamps_zero_delta() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        assert_eq!(clock.tick_at(start + Duration::from_millis(16)).frame_index, 0);
        assert_eq!(clock.tick_at(start + Duration::from_millis(32)).frame_index, 1);
    }

    #[test]
    fn average_starts_at_first_sample_and_moves_toward_new_ones() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        let first = clock.tick_at(start + Duration::from_millis(10));
        assert!((first.avg_ms - 10.0).abs() < 1e-3);

        let second = clock.tick_at(start + Duration::from_millis(30));
        // 10 + (20 - 10) * 0.1
        assert!((second.avg_ms - 11.0).abs() < 1e-3);
    }
}
