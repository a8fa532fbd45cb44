use kiss3d::camera::Camera;
use kiss3d::renderer::Renderer;
use nalgebra::Matrix4;

use self::mesh_renderer::MeshRenderer;
use crate::model::{
    BodyID, BodyMesh, NodeKind, RingMesh, SceneHierarchy, StepRenderer, WorldTransforms,
};

mod mesh_renderer;

/// Draws bodies as cubes and orbit rings as line strips, using the world
/// transforms from the most recent step.
pub struct SceneRenderer {
    body_renderer: MeshRenderer,
    ring_renderer: MeshRenderer,
    // Fixed for the life of the scene, indexed by BodyID
    kinds: Vec<NodeKind>,
}

impl SceneRenderer {
    pub fn new(scene: &SceneHierarchy, body_mesh: &BodyMesh, ring_mesh: &RingMesh) -> Self {
        SceneRenderer {
            body_renderer: MeshRenderer::triangles(body_mesh),
            ring_renderer: MeshRenderer::line_strip(ring_mesh),
            kinds: scene.bodies().map(|b| b.params.kind).collect(),
        }
    }

    fn models_of_kind(&self, transforms: &WorldTransforms, kind: NodeKind) -> Vec<Matrix4<f32>> {
        transforms
            .iter()
            .filter(|(id, _)| self.kind_of(*id) == kind)
            .map(|(_, m)| *m)
            .collect()
    }

    fn kind_of(&self, id: BodyID) -> NodeKind {
        self.kinds[id.0]
    }
}

impl StepRenderer for SceneRenderer {
    fn submit(&mut self, transforms: &WorldTransforms) {
        debug_assert_eq!(transforms.len(), self.kinds.len());
        let bodies = self.models_of_kind(transforms, NodeKind::Body);
        let rings = self.models_of_kind(transforms, NodeKind::OrbitRing);
        self.body_renderer.set_models(bodies);
        self.ring_renderer.set_models(rings);
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.body_renderer.render(pass, camera);
        self.ring_renderer.render(pass, camera);
    }
}
