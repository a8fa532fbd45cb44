use std::time::{Duration, Instant};

use kiss3d::event::{Action, Event, Key, WindowEvent};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const STEP_RATE_WINDOW: Duration = Duration::from_secs(1);

pub struct Controller {
    paused: bool,
    step_rate: StepRate,
}

/// Measured simulation steps per second. The rate is refreshed once a full
/// window of wall time has been observed, and is zero until then.
pub struct StepRate {
    window: Duration,
    window_start: Instant,
    steps_in_window: u32,
    rate: f64,
}

impl StepRate {
    pub fn new(window: Duration, now: Instant) -> Self {
        StepRate {
            window,
            window_start: now,
            steps_in_window: 0,
            rate: 0.0,
        }
    }

    /// Forgets everything measured so far and opens a new window at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.window_start = now;
        self.steps_in_window = 0;
        self.rate = 0.0;
    }

    pub fn record_step(&mut self, now: Instant) {
        self.steps_in_window += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= self.window {
            self.rate = f64::from(self.steps_in_window) / elapsed.as_secs_f64();
            self.window_start = now;
            self.steps_in_window = 0;
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            paused: false,
            step_rate: StepRate::new(STEP_RATE_WINDOW, Instant::now()),
        }
    }

    pub fn process_event(&mut self, event: Event, now: Instant) {
        if let WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) = event.value {
            self.toggle_pause(now);
        }
    }

    /// Pausing and resuming both restart the rate measurement, so a resumed
    /// run never averages in the time it spent paused.
    pub fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        self.step_rate.restart(now);
        tracing::info!(paused = self.paused, "toggled pause");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn steps_per_second(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            self.step_rate.rate()
        }
    }

    pub fn record_step(&mut self, now: Instant) {
        self.step_rate.record_step(now)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pause_toggles() {
        let now = Instant::now();
        let mut controller = Controller::new();
        assert!(!controller.is_paused());
        controller.toggle_pause(now);
        assert!(controller.is_paused());
        controller.toggle_pause(now);
        assert!(!controller.is_paused());
    }

    #[test]
    fn test_rate_needs_a_full_window() {
        let start = Instant::now();
        let mut rate = StepRate::new(millis(1000), start);

        for i in 1..10 {
            rate.record_step(start + millis(100 * i));
        }
        assert_eq!(rate.rate(), 0.0);

        // Tenth step closes the window: 10 steps over one second
        rate.record_step(start + millis(1000));
        assert!((rate.rate() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_is_zero_while_paused() {
        let start = Instant::now();
        let mut controller = Controller::new();
        controller.step_rate = StepRate::new(millis(1000), start);
        for i in 1..=20 {
            controller.record_step(start + millis(50 * i));
        }
        assert!(controller.steps_per_second() > 0.0);

        controller.toggle_pause(start + millis(1000));
        assert_eq!(controller.steps_per_second(), 0.0);
    }

    #[test]
    fn test_resume_starts_a_fresh_window() {
        let start = Instant::now();
        let mut controller = Controller::new();
        controller.step_rate = StepRate::new(millis(1000), start);
        for i in 1..=20 {
            controller.record_step(start + millis(50 * i));
        }

        // Paused for a long time, then resumed
        controller.toggle_pause(start + millis(1000));
        let resumed = start + millis(60_000);
        controller.toggle_pause(resumed);
        assert_eq!(controller.steps_per_second(), 0.0);

        // One step right after resuming must not be averaged over the pause
        controller.record_step(resumed + millis(10));
        assert_eq!(controller.steps_per_second(), 0.0);

        for i in 1..=10 {
            controller.record_step(resumed + millis(10 + 100 * i));
        }
        assert!((controller.steps_per_second() - 11.0 / 1.01).abs() < 1e-9);
    }

    #[test]
    fn test_clock_going_backwards_is_harmless() {
        let start = Instant::now() + millis(5000);
        let mut rate = StepRate::new(millis(1000), start);
        rate.record_step(start - millis(3000));
        assert_eq!(rate.rate(), 0.0);
    }
}
