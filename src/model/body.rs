use nalgebra::{Matrix4, Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use super::SceneError;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// An animated body, drawn as a cube.
    Body,
    /// A decorative orbit path, drawn with the shared ring polyline.
    OrbitRing,
}

/// A rotation about a fixed axis. Used both for time-driven motion (where the
/// angle comes from the phase state) and for the constant tilt of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: Unit<Vector3<f32>>,
    pub angle: f32,
}

/// Angular motion that accumulates every step: `angle += rate * dt + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub rate: f32,
    // Some bodies get an extra per-step nudge on top of the shared rate
    pub offset: f32,
    pub axis: Unit<Vector3<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub rotation_angle: f32,
    pub orbit_angle: f32,
}

/// Everything about a node that doesn't change once the scene is built.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParams {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<BodyID>,
    pub tilt: Option<AxisAngle>,
    pub spin: Motion,
    pub orbit: Motion,
    pub orbit_radius: f32,
    pub scale: Vector3<f32>,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub params: BodyParams,
    pub phase: Phase,
}

impl AxisAngle {
    pub fn new(axis: Vector3<f32>, angle: f32) -> Result<Self, SceneError> {
        Ok(AxisAngle {
            axis: normalize_axis(axis)?,
            angle,
        })
    }

    pub fn to_homogeneous(&self) -> Matrix4<f32> {
        Matrix4::from_axis_angle(&self.axis, self.angle)
    }
}

impl Motion {
    pub fn new(rate: f32, offset: f32, axis: Vector3<f32>) -> Result<Self, SceneError> {
        Ok(Motion {
            rate,
            offset,
            axis: normalize_axis(axis)?,
        })
    }

    /// A motion that never moves, spinning around +Y.
    pub fn fixed() -> Self {
        Motion {
            rate: 0.0,
            offset: 0.0,
            axis: Vector3::y_axis(),
        }
    }

    pub fn increment(&self, dt: f32) -> f32 {
        self.rate * dt + self.offset
    }
}

impl Phase {
    pub fn zero() -> Self {
        Phase {
            rotation_angle: 0.0,
            orbit_angle: 0.0,
        }
    }
}

impl BodyParams {
    /// A body with no tilt, no motion, unit scale, sitting at its parent's origin.
    pub fn new(name: &str, kind: NodeKind, parent: Option<BodyID>) -> Self {
        BodyParams {
            name: name.to_owned(),
            kind,
            parent,
            tilt: None,
            spin: Motion::fixed(),
            orbit: Motion::fixed(),
            orbit_radius: 0.0,
            scale: Vector3::repeat(1.0),
        }
    }
}

impl Body {
    pub fn advance(&mut self, dt: f32) {
        // Rings are decoration; they only follow their parent
        if self.params.kind == NodeKind::OrbitRing {
            return;
        }
        self.phase.rotation_angle += self.params.spin.increment(dt);
        self.phase.orbit_angle += self.params.orbit.increment(dt);
    }

    /// Transform from this body's model space to its parent's space.
    ///
    /// The order is fixed: tilt, revolve around the parent, move out to the
    /// orbit radius, then spin and scale in place. Translating before the spin
    /// is what lets a body orbit at a distance while still turning on its own
    /// axis.
    pub fn local_transform(&self) -> Matrix4<f32> {
        let p = &self.params;
        let tilt = match &p.tilt {
            Some(tilt) => tilt.to_homogeneous(),
            None => Matrix4::identity(),
        };
        let revolution = Matrix4::from_axis_angle(&p.orbit.axis, self.phase.orbit_angle);
        let translation = Matrix4::new_translation(&(Vector3::x() * p.orbit_radius));
        let spin = Matrix4::from_axis_angle(&p.spin.axis, self.phase.rotation_angle);
        let scale = Matrix4::new_nonuniform_scaling(&p.scale);

        tilt * revolution * translation * spin * scale
    }
}

pub fn world_position(transform: &Matrix4<f32>) -> Point3<f32> {
    transform.transform_point(&Point3::origin())
}

fn normalize_axis(axis: Vector3<f32>) -> Result<Unit<Vector3<f32>>, SceneError> {
    Unit::try_new(axis, 1e-6).ok_or(SceneError::DegenerateAxis {
        x: axis.x,
        y: axis.y,
        z: axis.z,
    })
}
