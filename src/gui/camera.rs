use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::config::CameraConfig;

// Unlike ArcBall, this camera never moves. The view is a fixed look-at and
// only the projection reacts to the window being resized.
pub struct FixedCamera {
    // -- view --
    eye: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
    // -- perspective --
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl FixedCamera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        FixedCamera {
            eye: Point3::from(config.eye),
            target: Point3::from(config.target),
            up: Vector3::from(config.up),
            aspect: aspect_ratio(width, height).unwrap_or(1.0),
            fovy: config.fovy_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect, self.fovy, self.znear, self.zfar)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for FixedCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            // Minimized windows report (0, 0); keep the last usable aspect
            if let Some(aspect) = aspect_ratio(w, h) {
                self.aspect = aspect;
            }
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.target, &self.up)
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    if width == 0 || height == 0 {
        None
    } else {
        Some(width as f32 / height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = FixedCamera::new(&CameraConfig::default(), 800, 800);
        let target = Point3::from(CameraConfig::default().target);
        let ndc = camera.transformation().transform_point(&target);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_up_stays_up() {
        let camera = FixedCamera::new(&CameraConfig::default(), 800, 800);
        let above = camera
            .transformation()
            .transform_point(&Point3::new(0.0, 1.0, 0.75));
        assert!(above.y > 0.0);
    }

    #[test]
    fn test_zero_sized_framebuffer_still_projects() {
        let camera = FixedCamera::new(&CameraConfig::default(), 0, 0);
        let m = camera.transformation();
        assert!(m.iter().all(|x| x.is_finite()));

        let camera = FixedCamera::new(&CameraConfig::default(), 800, 0);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_aspect_ratio_rejects_empty_sizes() {
        assert_eq!(aspect_ratio(0, 0), None);
        assert_eq!(aspect_ratio(800, 0), None);
        assert_eq!(aspect_ratio(0, 600), None);
        assert_eq!(aspect_ratio(800, 400), Some(2.0));
    }
}
