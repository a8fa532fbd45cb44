//! The animation core: a fixed tree of bodies, the phase state that drives
//! them, and the pacing that decides when the tree moves.

mod body;
mod clock;
mod hierarchy;
mod mesh;
mod pacer;
mod ring;

pub use body::{world_position, AxisAngle, Body, BodyID, BodyParams, Motion, NodeKind, Phase};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use hierarchy::{SceneHierarchy, WorldTransforms};
pub use mesh::BodyMesh;
pub use pacer::{FramePacer, PacerState, StepRenderer};
pub use ring::RingMesh;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("node {child} names parent {parent}, but parents must come before their children")]
    ParentNotBeforeChild { child: usize, parent: usize },

    #[error("rotation axis ({x}, {y}, {z}) is too short to normalize")]
    DegenerateAxis { x: f32, y: f32, z: f32 },
}
