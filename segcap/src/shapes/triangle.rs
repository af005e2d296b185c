use std::sync::Arc;

use super::{Mesh, Shape};
use crate::{
    hit::Hit,
    math::{Bounds3, Normal, Ray},
    scene::ObjectId,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Triangle_Meshes.html

/// A single triangle that references its vertices in a shared [Mesh].
pub struct Triangle {
    mesh: Arc<Mesh>,
    vertices: [usize; 3],
    object: ObjectId,
}

impl Triangle {
    /// Creates a new `Triangle`.
    /// `first_vertex` is the index of the first vertex index in `mesh`'s index list.
    pub fn new(mesh: Arc<Mesh>, first_vertex: usize, object: ObjectId) -> Self {
        let vertices = [
            mesh.indices[first_vertex],
            mesh.indices[first_vertex + 1],
            mesh.indices[first_vertex + 2],
        ];

        Self {
            mesh,
            vertices,
            object,
        }
    }
}

impl Shape for Triangle {
    fn intersect(&self, ray: &Ray<f32>) -> Option<Hit> {
        // Watertight test in a space where the ray lies on +z so rays through shared edges
        // can't slip between neighbouring triangles

        let (n, p0t, p1t, p2t, sz) = {
            let p0 = self.mesh.points[self.vertices[0]];
            let p1 = self.mesh.points[self.vertices[1]];
            let p2 = self.mesh.points[self.vertices[2]];

            let n = Normal::from((p1 - p0).cross(p2 - p0).normalized());

            let mut p0t = p0 - ray.o;
            let mut p1t = p1 - ray.o;
            let mut p2t = p2 - ray.o;

            // Largest direction component goes to z so the shear below is finite
            let kz = ray.d.abs().max_dimension();
            let kx = if kz < 2 { kz + 1 } else { 0 };
            let ky = if kx < 2 { kx + 1 } else { 0 };
            p0t = p0t.permuted(kx, ky, kz);
            p1t = p1t.permuted(kx, ky, kz);
            p2t = p2t.permuted(kx, ky, kz);
            let d = ray.d.permuted(kx, ky, kz);

            // z is sheared only after a hit is known
            let sx = -d.x / d.z;
            let sy = -d.y / d.z;
            let sz = 1.0 / d.z;
            p0t.x += sx * p0t.z;
            p0t.y += sy * p0t.z;
            p1t.x += sx * p1t.z;
            p1t.y += sy * p1t.z;
            p2t.x += sx * p2t.z;
            p2t.y += sy * p2t.z;

            (n, p0t, p1t, p2t, sz)
        };

        let (e0, e1, e2) = {
            let e0 = p1t.x * p2t.y - p1t.y * p2t.x;
            let e1 = p2t.x * p0t.y - p2t.y * p0t.x;
            let e2 = p0t.x * p1t.y - p0t.y * p1t.x;

            // Exactly on an edge, redo in double precision
            if (e0 == 0.0) || (e1 == 0.0) || (e2 == 0.0) {
                let e0 = (p1t.x as f64) * (p2t.y as f64) - (p1t.y as f64) * (p2t.x as f64);
                let e1 = (p2t.x as f64) * (p0t.y as f64) - (p2t.y as f64) * (p0t.x as f64);
                let e2 = (p0t.x as f64) * (p1t.y as f64) - (p0t.y as f64) * (p1t.x as f64);
                (e0 as f32, e1 as f32, e2 as f32)
            } else {
                (e0, e1, e2)
            }
        };

        // Mixed signs mean the ray passes outside
        if ((e0 < 0.0) || (e1 < 0.0) || (e2 < 0.0)) && ((e0 > 0.0) || (e1 > 0.0) || (e2 > 0.0)) {
            return None;
        }

        // Edge-on
        let det = e0 + e1 + e2;
        if det == 0.0 {
            return None;
        }

        let p0z = p0t.z * sz;
        let p1z = p1t.z * sz;
        let p2z = p2t.z * sz;
        let t_scaled = e0 * p0z + e1 * p1z + e2 * p2z;

        if ((det < 0.0) && ((t_scaled >= 0.0) || (t_scaled < ray.t_max * det)))
            || ((det > 0.0) && ((t_scaled <= 0.0) || (t_scaled > ray.t_max * det)))
        {
            return None;
        }

        let t = t_scaled / det;

        Some(Hit {
            t,
            p: ray.point(t),
            n: n.face_forward(-ray.d),
            object: self.object,
        })
    }

    fn world_bound(&self) -> Bounds3<f32> {
        Bounds3::new(
            self.mesh.points[self.vertices[0]],
            self.mesh.points[self.vertices[1]],
        )
        .union_p(self.mesh.points[self.vertices[2]])
    }

    fn object(&self) -> ObjectId {
        self.object
    }
}
