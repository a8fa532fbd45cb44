use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};
use nalgebra::{Matrix4, Point3};

use crate::model::{BodyMesh, RingMesh};

/// Draws one static mesh many times, once per model matrix.
pub struct MeshRenderer {
    // OpenGL stuff
    shader: Effect,
    pos: ShaderAttribute<Point3<f32>>,
    color: ShaderAttribute<Point3<f32>>,
    mvp: ShaderUniform<Matrix4<f32>>,
    primitive: u32,
    // Mesh, stored as (pt, color, pt, color), uploaded once
    vertices: GPUVec<Point3<f32>>,
    num_vertices: i32,
    // Where to draw it
    models: Vec<Matrix4<f32>>,
}

impl MeshRenderer {
    fn new(data: Vec<Point3<f32>>, primitive: u32) -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        let num_vertices = (data.len() / 2) as i32;
        MeshRenderer {
            pos: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            color: shader
                .get_attrib::<Point3<f32>>("color")
                .expect("Failed to get shader attribute."),
            mvp: shader
                .get_uniform::<Matrix4<f32>>("mvp")
                .expect("Failed to get shader uniform."),
            shader,
            primitive,
            vertices: GPUVec::new(data, BufferType::Array, AllocationType::StaticDraw),
            num_vertices,
            models: vec![],
        }
    }

    /// Renders the mesh as a plain triangle list.
    pub fn triangles(mesh: &BodyMesh) -> Self {
        let mut data = Vec::with_capacity(2 * mesh.indices.len());
        for (pt, color) in mesh.triangle_vertices() {
            data.push(pt);
            data.push(color);
        }
        Self::new(data, Context::TRIANGLES)
    }

    /// Renders the ring as a connected strip, one line per consecutive pair
    /// of indices.
    pub fn line_strip(ring: &RingMesh) -> Self {
        let mut data = Vec::with_capacity(4 * ring.indices.len());
        for (a, b) in ring.segments() {
            data.push(a);
            data.push(ring.color);
            data.push(b);
            data.push(ring.color);
        }
        Self::new(data, Context::LINES)
    }

    pub fn set_models<I: IntoIterator<Item = Matrix4<f32>>>(&mut self, models: I) {
        self.models.clear();
        self.models.extend(models);
    }
}

impl Renderer for MeshRenderer {
    fn render(&mut self, _pass: usize, camera: &mut dyn Camera) {
        if self.models.is_empty() {
            return;
        }

        self.shader.use_program();
        self.pos.enable();
        self.color.enable();

        self.pos.bind_sub_buffer(&mut self.vertices, 1, 0);
        self.color.bind_sub_buffer(&mut self.vertices, 1, 1);

        let view_projection = camera.transformation();
        let ctxt = Context::get();
        for model in self.models.iter() {
            self.mvp.upload(&(view_projection * model));
            ctxt.draw_arrays(self.primitive, 0, self.num_vertices);
        }

        self.pos.disable();
        self.color.disable();
    }
}

/// Vertex shader: one combined model-view-projection matrix per draw.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 color;
    varying   vec3 vColor;
    uniform   mat4 mvp;
    void main() {
        gl_Position = mvp * vec4(position, 1.0);
        vColor = color;
    }";

/// Fragment shader: passes the interpolated vertex color through.
static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vColor;
    void main() {
        gl_FragColor = vec4(vColor, 1.0);
    }";
