mod mesh;
mod sphere;
mod triangle;

pub use mesh::Mesh;
pub use sphere::Sphere;
pub use triangle::Triangle;

use crate::{
    hit::Hit,
    math::{Bounds3, Ray},
    scene::ObjectId,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Basic_Shape_Interface.html#Shape

pub trait Shape: Send + Sync {
    /// Intersects [Ray] with this shape, considering hits in `(0, ray.t_max]`.
    fn intersect(&self, ray: &Ray<f32>) -> Option<Hit>;
    /// Returns the world space AABB of the shape
    fn world_bound(&self) -> Bounds3<f32>;
    /// Returns the scene object this shape is a part of
    fn object(&self) -> ObjectId;
}
