use super::clock::Clock;
use super::hierarchy::{SceneHierarchy, WorldTransforms};

/// Receives the world transforms produced by each step.
pub trait StepRenderer {
    fn submit(&mut self, transforms: &WorldTransforms);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerState {
    Idle,
    Stepping,
}

/// Decides, once per poll, whether the scene should take a step.
///
/// Each step advances the scene by the same fixed amount regardless of how
/// much wall-clock time actually passed, so animation speed follows the step
/// rate. If polls come in late, the missed steps are dropped rather than
/// replayed.
#[derive(Debug, Clone)]
pub struct FramePacer {
    update_interval: f64,
    step_size: f32,
    last_update_time: f64,
    state: PacerState,
    steps_taken: u64,
}

impl FramePacer {
    pub fn new(update_interval: f64, step_size: f32, start_time: f64) -> Self {
        FramePacer {
            update_interval,
            step_size,
            last_update_time: start_time,
            state: PacerState::Idle,
            steps_taken: 0,
        }
    }

    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn is_due(&self, now: f64) -> bool {
        now - self.last_update_time > self.update_interval
    }

    /// Restarts the interval from `now`, e.g. after a pause.
    pub fn reset(&mut self, now: f64) {
        self.last_update_time = now;
    }

    /// Samples the clock and, if an interval has elapsed, advances the scene
    /// by one step and hands the new transforms to the renderer. Returns
    /// whether a step was taken.
    pub fn poll(
        &mut self,
        clock: &dyn Clock,
        scene: &mut SceneHierarchy,
        renderer: &mut dyn StepRenderer,
    ) -> bool {
        let now = clock.now();
        if !self.is_due(now) {
            return false;
        }

        self.state = PacerState::Stepping;
        scene.advance(self.step_size);
        let transforms = scene.compute_world_transforms();
        renderer.submit(&transforms);
        self.last_update_time = now;
        self.steps_taken += 1;
        self.state = PacerState::Idle;

        tracing::trace!(step = self.steps_taken, time = now, "advanced scene");
        true
    }
}
