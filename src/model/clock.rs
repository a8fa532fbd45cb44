use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic time, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Seconds since the clock was created.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to. Handy for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        ManualClock {
            time: Cell::new(start),
        }
    }

    pub fn set(&self, time: f64) {
        assert!(
            time >= self.time.get(),
            "Clock must not run backwards, tried to go from {} to {}",
            self.time.get(),
            time
        );
        self.time.set(time);
    }

    pub fn advance_by(&self, seconds: f64) {
        self.set(self.time.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}
