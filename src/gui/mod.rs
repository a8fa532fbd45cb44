use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::text::Font;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3};

use self::camera::FixedCamera;
use self::controller::Controller;
use self::renderers::SceneRenderer;
use crate::config::Config;
use crate::model::{
    BodyMesh, Clock, FramePacer, MonotonicClock, RingMesh, SceneHierarchy, StepRenderer,
};

mod camera;
mod controller;
mod renderers;

/// Window state: polls the pacer once per frame and draws whatever the most
/// recent step produced.
pub struct Simulation {
    scene: SceneHierarchy,
    pacer: FramePacer,
    clock: MonotonicClock,
    controller: Controller,
    camera: FixedCamera,
    renderer: SceneRenderer,
}

impl Simulation {
    /// `scene` is the hierarchy returned by [`Config::validate`].
    pub fn new(config: &Config, scene: SceneHierarchy, window: &Window) -> Self {
        let ring = RingMesh::generate(config.ring.segment_count, config.ring.color());
        let mut renderer = SceneRenderer::new(&scene, &BodyMesh::cube(), &ring);
        // Show the starting pose until the first step comes in
        renderer.submit(&scene.compute_world_transforms());

        let clock = MonotonicClock::new();
        let pacer = FramePacer::new(
            config.pacing.update_interval_seconds,
            config.pacing.step_size,
            clock.now(),
        );
        tracing::info!(
            nodes = scene.len(),
            interval = pacer.update_interval(),
            step = pacer.step_size(),
            ring_points = ring.positions.len(),
            "scene ready"
        );

        Self {
            scene,
            pacer,
            clock,
            controller: Controller::new(),
            camera: FixedCamera::new(&config.camera, window.width(), window.height()),
            renderer,
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        let was_paused = self.controller.is_paused();
        for event in events.iter() {
            self.controller.process_event(event, Instant::now());
        }

        // Don't let time spent paused count towards the next step
        if was_paused && !self.controller.is_paused() {
            self.pacer.reset(self.clock.now());
        }
    }

    fn status_text(&self) -> String {
        status_text(
            self.pacer.steps_taken(),
            self.controller.is_paused(),
            self.controller.steps_per_second(),
        )
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }

    fn step(&mut self, window: &mut Window) {
        // Input is only ever handled between steps
        self.process_user_input(window.events());

        if !self.controller.is_paused()
            && self
                .pacer
                .poll(&self.clock, &mut self.scene, &mut self.renderer)
        {
            self.controller.record_step(Instant::now());
        }

        window.draw_text(
            &self.status_text(),
            &Point2::origin(),
            40.0,
            &Font::default(),
            &Point3::new(1.0, 1.0, 1.0),
        );
    }
}

fn status_text(steps_taken: u64, paused: bool, steps_per_second: f64) -> String {
    let state = if paused { "paused" } else { "running" };
    format!(
        "Steps: {} ({})\nSteps/s: {:.0}",
        steps_taken, state, steps_per_second
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_lines_are_not_indented() {
        let text = status_text(42, false, 59.6);
        assert_eq!(text, "Steps: 42 (running)\nSteps/s: 60");
        for line in text.lines() {
            assert_eq!(line, line.trim_start());
        }
    }

    #[test]
    fn test_status_text_when_paused() {
        assert_eq!(
            status_text(7, true, 0.0),
            "Steps: 7 (paused)\nSteps/s: 0"
        );
    }
}
