use std::time::{Duration, Instant};

/// Timing for one tick.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped. This is what `FrameState`
    /// accumulates.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Ticks since the clock was created.
    pub frame_index: u64,
}

/// Per-window delta-time source.
///
/// Delta time is clamped so a debugger pause, a minimized window or a long
/// surface rebuild does not jump the animation forward by seconds.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Clamps dt to `[0.1ms, 250ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        Self::starting_at(Instant::now(), dt_min, dt_max)
    }

    fn starting_at(last: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Moves the baseline to now, so the next dt does not include a pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
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
    use approx::assert_relative_eq;

    fn clock(t0: Instant) -> FrameClock {
        FrameClock::starting_at(t0, Duration::from_micros(100), Duration::from_millis(250))
    }

    // ── delta time ────────────────────────────────────────────────────────

    #[test]
    fn reports_elapsed_seconds() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let ft = c.tick_at(t0 + Duration::from_millis(20));
        assert_relative_eq!(ft.dt, 0.020, epsilon = 1e-6);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn long_stall_clamped() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let ft = c.tick_at(t0 + Duration::from_secs(5));
        assert_relative_eq!(ft.dt, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn zero_elapsed_clamped_up() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let ft = c.tick_at(t0);
        assert_relative_eq!(ft.dt, 0.0001, epsilon = 1e-7);
    }

    #[test]
    fn frame_index_increments() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        for i in 0..3u64 {
            let ft = c.tick_at(t0 + Duration::from_millis(16 * (i + 1)));
            assert_eq!(ft.frame_index, i);
        }
    }
}
