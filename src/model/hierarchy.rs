use nalgebra::{Matrix4, Point3};

use super::body::{world_position, Body, BodyID, BodyParams, Phase};
use super::SceneError;

/// World transforms for every node, indexed by `BodyID`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTransforms {
    transforms: Vec<Matrix4<f32>>,
}

/// Owns every node of the scene, in an order where parents always come
/// before their children.
#[derive(Debug, Clone)]
pub struct SceneHierarchy {
    bodies: Vec<Body>,
}

impl WorldTransforms {
    pub fn get(&self, id: BodyID) -> &Matrix4<f32> {
        &self.transforms[id.0]
    }

    pub fn position(&self, id: BodyID) -> Point3<f32> {
        world_position(self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyID, &Matrix4<f32>)> + '_ {
        self.transforms
            .iter()
            .enumerate()
            .map(|(idx, m)| (BodyID(idx), m))
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl SceneHierarchy {
    pub fn new() -> Self {
        SceneHierarchy { bodies: vec![] }
    }

    /// Builds a hierarchy from node parameters; each node's id is its index.
    pub fn from_params<I>(params: I) -> Result<Self, SceneError>
    where
        I: IntoIterator<Item = BodyParams>,
    {
        let mut hierarchy = Self::new();
        for p in params {
            hierarchy.add_body(p)?;
        }
        Ok(hierarchy)
    }

    pub fn add_body(&mut self, params: BodyParams) -> Result<BodyID, SceneError> {
        self.add_body_with_phase(params, Phase::zero())
    }

    pub fn add_body_with_phase(
        &mut self,
        params: BodyParams,
        phase: Phase,
    ) -> Result<BodyID, SceneError> {
        let id = BodyID(self.bodies.len());

        // A parent has to already exist, which also rules out cycles
        if let Some(parent) = params.parent {
            if parent >= id {
                return Err(SceneError::ParentNotBeforeChild {
                    child: id.0,
                    parent: parent.0,
                });
            }
        }

        tracing::debug!(id = id.0, name = %params.name, kind = ?params.kind, "added node");
        self.bodies.push(Body { id, params, phase });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn get_parent(&self, id: BodyID) -> Option<BodyID> {
        self.bodies[id.0].params.parent
    }

    pub fn set_phase(&mut self, id: BodyID, phase: Phase) {
        self.bodies[id.0].phase = phase;
    }

    /// Moves every body forward by one step of size `dt`.
    pub fn advance(&mut self, dt: f32) {
        for body in self.bodies.iter_mut() {
            body.advance(dt);
        }
    }

    pub fn compute_world_transforms(&self) -> WorldTransforms {
        let mut transforms: Vec<Matrix4<f32>> = Vec::with_capacity(self.bodies.len());
        for body in self.bodies.iter() {
            // Parents precede children, so the parent's entry is already filled in
            let parent_world = match body.params.parent {
                Some(parent) => transforms[parent.0],
                None => Matrix4::identity(),
            };
            transforms.push(parent_world * body.local_transform());
        }
        WorldTransforms { transforms }
    }
}

impl Default for SceneHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
