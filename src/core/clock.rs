use std::time::Instant;

/// Longest single frame step fed to the camera, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Frame clock for the render host - wall-clock delta between frames.
///
/// Deltas are clamped so a stalled frame cannot fast-forward an animation,
/// and [`reset`](Self::reset) after a suspension makes the pause invisible.
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    max_delta: f32,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Same as [`tick`](Self::tick) with an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta.min(self.max_delta)
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        // Should be roughly 10ms = 0.01s
        assert!(delta >= 0.009 && delta <= 0.050);
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick();
        // Should be very small since we just reset
        assert!(delta < 0.005);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = Clock::with_max_delta(0.1);
        let later = Instant::now() + Duration::from_secs(5);
        assert_eq!(clock.tick_at(later), 0.1);
    }

    #[test]
    fn earlier_timestamp_yields_zero() {
        let mut clock = Clock::new();
        let later = Instant::now() + Duration::from_millis(50);
        clock.tick_at(later);
        assert_eq!(clock.tick_at(later - Duration::from_millis(20)), 0.0);
    }
}
