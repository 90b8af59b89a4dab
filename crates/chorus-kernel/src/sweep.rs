//! Sweep cadence for reclaiming finished sources.
//!
//! The pool does not get completion callbacks from the host. Instead it polls
//! every active source once per interval. A finished one-shot can therefore
//! stay active for up to one interval after it stops.

/// Default interval between sweeps, in seconds.
pub const DEFAULT_SWEEP_INTERVAL: f32 = 0.5;

/// Smallest sweep interval accepted by [`SweepTimer::set_interval`].
pub const MIN_SWEEP_INTERVAL: f32 = 0.01;

/// Accumulates frame time and signals when a sweep is due.
#[derive(Debug, Clone)]
pub struct SweepTimer {
    /// Time since the last sweep
    accumulator: f32,
    /// Time between sweeps
    interval: f32,
}

impl Default for SweepTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_INTERVAL)
    }
}

impl SweepTimer {
    /// Create a timer with the given interval.
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            accumulator: 0.0,
            interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Add frame time. Returns true when the interval has been reached, in
    /// which case the accumulator is reset to zero.
    ///
    /// Leftover time past the threshold is dropped, so a long frame triggers
    /// a single sweep rather than a burst.
    pub fn accumulate(&mut self, dt: f32) -> bool {
        self.accumulator += dt.max(0.0);
        if self.accumulator >= self.interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Time accumulated since the last sweep.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.accumulator
    }

    /// Interval between sweeps.
    #[must_use]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Set the interval between sweeps.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval.max(MIN_SWEEP_INTERVAL);
    }

    /// Reset the accumulator (call after pause or loading).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_never_fires() {
        let mut timer = SweepTimer::default();
        for _ in 0..29 {
            assert!(!timer.accumulate(1.0 / 60.0));
        }
        assert!(timer.elapsed() < DEFAULT_SWEEP_INTERVAL);
    }

    #[test]
    fn test_fires_at_threshold_and_resets() {
        let mut timer = SweepTimer::new(0.5);
        assert!(!timer.accumulate(0.25));
        assert!(timer.accumulate(0.25));
        assert_eq!(timer.elapsed(), 0.0);
        assert!(!timer.accumulate(0.25));
    }

    #[test]
    fn test_long_frame_fires_once() {
        let mut timer = SweepTimer::new(0.5);
        assert!(timer.accumulate(3.0));
        assert_eq!(timer.elapsed(), 0.0);
        assert!(!timer.accumulate(0.1));
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut timer = SweepTimer::new(0.5);
        timer.accumulate(0.4);
        assert!(!timer.accumulate(-1.0));
        assert!((timer.elapsed() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_interval_minimum() {
        let mut timer = SweepTimer::new(0.0);
        assert!((timer.interval() - MIN_SWEEP_INTERVAL).abs() < f32::EPSILON);

        timer.set_interval(2.0);
        assert!((timer.interval() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset_timer() {
        let mut timer = SweepTimer::new(0.5);
        timer.accumulate(0.3);
        timer.reset();
        assert_eq!(timer.elapsed(), 0.0);
    }
}
