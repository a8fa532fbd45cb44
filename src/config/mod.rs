//! Startup configuration, persisted as RON.
//!
//! Everything here is read once when the program starts; the defaults
//! reproduce the reference solar system.

mod cli;
mod error;

pub use cli::CliArgs;
pub use error::ConfigError;

use std::convert::TryFrom;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::model::{AxisAngle, BodyID, BodyParams, Motion, NodeKind, Phase, SceneHierarchy};

/// Shared revolution speed of every orbiting body.
const ORBIT_SPEED: f32 = 0.3;
/// The two self-spin speeds the bodies choose between.
const ROTATION_SPEEDS: [f32; 2] = [0.1, 0.3];
/// Constant tilt of every orbit ring, in radians about +X.
const RING_TILT: f32 = 1.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Step pacing.
    pub pacing: PacingConfig,
    /// Orbit ring geometry.
    pub ring: RingConfig,
    /// Fixed view and projection.
    pub camera: CameraConfig,
    /// The node table.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Minimum wall-clock time between two steps, in seconds.
    pub update_interval_seconds: f64,
    /// Amount every step advances the animation by, independent of how long
    /// the step actually took.
    pub step_size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    /// Number of points in the ring polyline, including the closing one.
    pub segment_count: usize,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Nodes in evaluation order. A node's id is its position in this list.
    pub nodes: Vec<NodeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: NodeKind,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub tilt: Option<TiltConfig>,
    #[serde(default)]
    pub spin: MotionConfig,
    #[serde(default)]
    pub orbit: MotionConfig,
    #[serde(default)]
    pub orbit_radius: f32,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TiltConfig {
    pub axis: [f32; 3],
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Angular speed, multiplied by the step size.
    pub rate: f32,
    /// Extra angle added every step on top of `rate`.
    pub offset: f32,
    pub axis: [f32; 3],
    pub initial_angle: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

fn default_kind() -> NodeKind {
    NodeKind::Body
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            update_interval_seconds: 0.02,
            step_size: 0.1,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            segment_count: 100,
            color: [1.0, 0.0, 0.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 3.0, 7.0],
            target: [0.0, 0.0, 0.75],
            up: [0.0, 1.0, 0.0],
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rate: 0.0,
            offset: 0.0,
            axis: [0.0, 1.0, 0.0],
            initial_angle: 0.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let [slow, fast] = ROTATION_SPEEDS;

        let body = |name: &str, parent: Option<usize>, radius: f32, spin: (f32, f32), scale: f32| {
            NodeConfig {
                name: name.to_string(),
                kind: NodeKind::Body,
                parent,
                tilt: None,
                spin: MotionConfig {
                    rate: spin.0,
                    offset: spin.1,
                    ..MotionConfig::default()
                },
                orbit: MotionConfig {
                    rate: if parent.is_some() { ORBIT_SPEED } else { 0.0 },
                    ..MotionConfig::default()
                },
                orbit_radius: radius,
                scale: [scale; 3],
            }
        };
        let ring = |name: &str, parent: Option<usize>, scale: f32| NodeConfig {
            name: name.to_string(),
            kind: NodeKind::OrbitRing,
            parent,
            tilt: Some(TiltConfig {
                axis: [1.0, 0.0, 0.0],
                angle: RING_TILT,
            }),
            spin: MotionConfig::default(),
            orbit: MotionConfig::default(),
            orbit_radius: 0.0,
            scale: [scale; 3],
        };

        Self {
            nodes: vec![
                body("sun", None, 0.0, (slow, 0.0), 0.5),
                body("planet 1", Some(0), 1.5, (fast, 0.1), 0.7),
                body("planet 2", Some(0), 3.0, (slow, -0.12), 0.4),
                body("inner moon", Some(2), 1.0, (fast, -0.2), 0.4),
                body("outer moon", Some(2), 1.75, (slow, 0.15), 0.5),
                ring("inner orbit", None, 1.5),
                ring("outer orbit", Some(0), 3.5),
                ring("inner moon orbit", Some(2), 1.75),
                ring("outer moon orbit", Some(2), 1.0),
            ],
        }
    }
}

// --- Conversions ---

impl MotionConfig {
    fn to_motion(self) -> Result<Motion, ConfigError> {
        Ok(Motion::new(self.rate, self.offset, Vector3::from(self.axis))?)
    }
}

impl NodeConfig {
    pub fn to_params(&self) -> Result<BodyParams, ConfigError> {
        let mut params = BodyParams::new(&self.name, self.kind, self.parent.map(BodyID));
        params.tilt = match self.tilt {
            Some(tilt) => Some(AxisAngle::new(Vector3::from(tilt.axis), tilt.angle)?),
            None => None,
        };
        params.spin = self.spin.to_motion()?;
        params.orbit = self.orbit.to_motion()?;
        params.orbit_radius = self.orbit_radius;
        params.scale = Vector3::from(self.scale);
        Ok(params)
    }

    pub fn initial_phase(&self) -> Phase {
        Phase {
            rotation_angle: self.spin.initial_angle,
            orbit_angle: self.orbit.initial_angle,
        }
    }
}

impl SceneConfig {
    pub fn build(&self) -> Result<SceneHierarchy, ConfigError> {
        let mut hierarchy = SceneHierarchy::new();
        for node in self.nodes.iter() {
            hierarchy.add_body_with_phase(node.to_params()?, node.initial_phase())?;
        }
        Ok(hierarchy)
    }
}

impl RingConfig {
    pub fn color(&self) -> Point3<f32> {
        Point3::from(self.color)
    }
}

// --- Load / Save / Validate ---

impl Config {
    /// Load config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if one was given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Save config to the given file as RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        tracing::info!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Checks the values that would otherwise only blow up deep inside the
    /// simulation or the renderer, then builds the hierarchy the node table
    /// describes.
    pub fn validate(&self) -> Result<SceneHierarchy, ConfigError> {
        let interval = self.pacing.update_interval_seconds;
        if !interval.is_finite() || interval < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "pacing.update_interval_seconds",
                reason: format!("must be finite and non-negative, got {}", interval),
            });
        }
        if !self.pacing.step_size.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "pacing.step_size",
                reason: format!("must be finite, got {}", self.pacing.step_size),
            });
        }
        let segments = self.ring.segment_count;
        if segments < 2 || u32::try_from(segments).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "ring.segment_count",
                reason: format!("must be between 2 and {}, got {}", u32::MAX, segments),
            });
        }
        self.camera.validate()?;
        if self.scene.nodes.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scene.nodes",
                reason: "scene has no nodes".to_string(),
            });
        }
        self.scene.build()
    }
}

impl CameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let finite = |v: &[f32]| v.iter().all(|x| x.is_finite());
        if !finite(&self.eye) || !finite(&self.target) || !finite(&self.up) {
            return Err(ConfigError::InvalidValue {
                field: "camera",
                reason: "eye, target and up must be finite".to_string(),
            });
        }
        if !(self.fovy_degrees > 0.0 && self.fovy_degrees < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.fovy_degrees",
                reason: format!("must be in (0, 180), got {}", self.fovy_degrees),
            });
        }
        if !(self.znear > 0.0 && self.znear < self.zfar && self.zfar.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "camera.znear",
                reason: format!(
                    "need 0 < znear < zfar, got znear {} and zfar {}",
                    self.znear, self.zfar
                ),
            });
        }
        Ok(())
    }
}
