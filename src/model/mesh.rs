use nalgebra::Point3;

/// An indexed triangle mesh with one color per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyMesh {
    pub positions: Vec<Point3<f32>>,
    pub colors: Vec<Point3<f32>>,
    pub indices: Vec<u32>,
}

impl BodyMesh {
    /// Unit cube centred on the origin, each corner a different color.
    pub fn cube() -> Self {
        let corners: [([f32; 3], [f32; 3]); 8] = [
            // (position, color)
            ([-0.5, 0.5, 0.5], [1.0, 0.0, 1.0]),
            ([-0.5, -0.5, 0.5], [1.0, 0.0, 0.0]),
            ([0.5, 0.5, 0.5], [1.0, 1.0, 1.0]),
            ([0.5, -0.5, 0.5], [1.0, 1.0, 0.0]),
            ([-0.5, 0.5, -0.5], [0.0, 0.0, 1.0]),
            ([-0.5, -0.5, -0.5], [0.0, 0.0, 0.0]),
            ([0.5, 0.5, -0.5], [0.0, 1.0, 1.0]),
            ([0.5, -0.5, -0.5], [0.0, 1.0, 0.0]),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2,  2, 1, 3, // front
            4, 5, 0,  0, 5, 1, // left
            2, 3, 6,  6, 3, 7, // right
            4, 0, 6,  6, 0, 2, // top
            1, 5, 3,  3, 5, 7, // bottom
            5, 4, 7,  7, 4, 6, // back
        ];

        BodyMesh {
            positions: corners.iter().map(|(p, _)| Point3::from(*p)).collect(),
            colors: corners.iter().map(|(_, c)| Point3::from(*c)).collect(),
            indices,
        }
    }

    /// Flattens the index buffer into one (position, color) pair per
    /// triangle corner.
    pub fn triangle_vertices(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.indices
            .iter()
            .map(move |&i| (self.positions[i as usize], self.colors[i as usize]))
    }
}
