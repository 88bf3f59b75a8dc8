/// Countdown over a fixed duration, advanced by frame deltas.
///
/// Only accumulates what it is fed: if the host stops ticking, the countdown
/// stops too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
}

impl Countdown {
    /// Negative or non-finite durations become zero
    pub fn new(duration: f32) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Tick with delta, returns true once the duration has been reached
    pub fn tick(&mut self, delta: f32) -> bool {
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
        }
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Get progress [0, 1]; a zero-length countdown is always complete
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_reports_progress() {
        let mut timer = Countdown::new(1.0);

        assert!(!timer.tick(0.5));
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn zero_duration_is_complete() {
        let mut timer = Countdown::new(0.0);
        assert!(timer.is_finished());
        assert!(timer.tick(0.0));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn negative_duration_is_clamped() {
        let timer = Countdown::new(-2.0);
        assert_eq!(timer.duration(), 0.0);
        assert!(timer.is_finished());
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut timer = Countdown::new(1.0);
        assert!(!timer.tick(-1.0));
        assert!(!timer.tick(f32::NAN));
        assert_eq!(timer.elapsed(), 0.0);
    }
}
