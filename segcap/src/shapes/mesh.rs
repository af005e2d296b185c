use std::sync::Arc;

use super::{Shape, Triangle};
use crate::{
    math::{Point3, Transform, Vec3},
    scene::{ObjectId, SceneError},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Triangle_Meshes.html

/// Stores the geometry data of a triangle mesh
pub struct Mesh {
    /// Triangle vertex indices stored as triplets
    pub indices: Vec<usize>,
    /// Points in world space
    pub points: Vec<Point3<f32>>,
}

impl Mesh {
    /// Creates a new `Mesh`, moving `points` to world space.
    pub fn new(
        object_to_world: &Transform<f32>,
        indices: Vec<usize>,
        mut points: Vec<Point3<f32>>,
    ) -> Result<Self, SceneError> {
        if indices.len() % 3 != 0 {
            return Err(SceneError::InvalidShape(format!(
                "Mesh index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&i) = indices.iter().find(|&&i| i >= points.len()) {
            return Err(SceneError::InvalidShape(format!(
                "Mesh index {} out of range for {} points",
                i,
                points.len()
            )));
        }

        for p in &mut points {
            *p = object_to_world * *p;
        }

        Ok(Self { indices, points })
    }

    /// Creates an axis-aligned box in object space, 12 triangles wound counter clockwise.
    pub fn cuboid(
        object_to_world: &Transform<f32>,
        center: Point3<f32>,
        size: Vec3<f32>,
    ) -> Result<Self, SceneError> {
        if size.x < 0.0 || size.y < 0.0 || size.z < 0.0 {
            return Err(SceneError::InvalidShape(format!(
                "Cuboid with negative size {:?}",
                size
            )));
        }

        let h = size / 2.0;
        // Corner i has +x if bit 0 is set, +y for bit 1 and +z for bit 2
        let points = (0..8)
            .map(|i| {
                let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
                center + Vec3::new(h.x * sign(1), h.y * sign(2), h.z * sign(4))
            })
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 3, 0, 3, 1, // -z
            4, 5, 7, 4, 7, 6, // +z
            0, 4, 6, 0, 6, 2, // -x
            1, 3, 7, 1, 7, 5, // +x
            0, 1, 5, 0, 5, 4, // -y
            2, 6, 7, 2, 7, 3, // +y
        ];

        Self::new(object_to_world, indices, points)
    }

    /// Creates a planar quad from four corners given in order around its edge.
    pub fn quad(
        object_to_world: &Transform<f32>,
        corners: [Point3<f32>; 4],
    ) -> Result<Self, SceneError> {
        Self::new(object_to_world, vec![0, 1, 2, 0, 2, 3], corners.to_vec())
    }

    /// Splits the mesh into [Triangle] shapes that belong to `object`.
    pub fn triangles(self: &Arc<Self>, object: ObjectId) -> Vec<Arc<dyn Shape>> {
        (0..self.indices.len())
            .step_by(3)
            .map(|v0| Arc::new(Triangle::new(Arc::clone(self), v0, object)) as Arc<dyn Shape>)
            .collect()
    }
}
