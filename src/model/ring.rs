use std::convert::TryFrom;
use std::f32::consts::TAU;

use nalgebra::Point3;

/// A unit circle in the local XY plane, meant to be drawn as a line strip and
/// placed in the scene by an orbit-ring node's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RingMesh {
    pub positions: Vec<Point3<f32>>,
    pub indices: Vec<u32>,
    pub color: Point3<f32>,
}

impl RingMesh {
    /// Builds a ring from `segment_count` points.
    ///
    /// The angle step is `2π / (segment_count - 1)`, so the last point lands
    /// back on the first one. That duplicated endpoint is what closes the
    /// strip; there is no wrap-around index.
    pub fn generate(segment_count: usize, color: Point3<f32>) -> Self {
        assert!(
            segment_count >= 2,
            "Must have at least two ring points, segment_count was {}",
            segment_count
        );
        // Indices are u32 on the GPU side
        let last_index = u32::try_from(segment_count - 1).unwrap_or_else(|_| {
            panic!(
                "Ring points must be addressable by u32 indices, segment_count was {}",
                segment_count
            )
        });

        let step = TAU / (segment_count - 1) as f32;
        let positions = (0..segment_count)
            .map(|i| {
                let theta = i as f32 * step;
                Point3::new(theta.cos(), theta.sin(), 0.0)
            })
            .collect();
        let indices = (0..=last_index).collect();

        RingMesh {
            positions,
            indices,
            color,
        }
    }

    /// Consecutive index pairs of the strip, one per drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.indices.windows(2).map(move |pair| {
            (
                self.positions[pair[0] as usize],
                self.positions[pair[1] as usize],
            )
        })
    }
}
