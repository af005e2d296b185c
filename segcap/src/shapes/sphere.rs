use super::Shape;
use crate::{
    hit::Hit,
    math::{Bounds3, Normal, Point3, Ray, Transform, Vec3},
    scene::ObjectId,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Shapes/Spheres.html

/// A sphere centered at the object space origin.
pub struct Sphere {
    object_to_world: Transform<f32>,
    world_to_object: Transform<f32>,
    radius: f32,
    object: ObjectId,
}

impl Sphere {
    /// Creates a new `Sphere`.
    pub fn new(object_to_world: &Transform<f32>, radius: f32, object: ObjectId) -> Self {
        debug_assert!(radius > 0.0);

        Self {
            object_to_world: object_to_world.clone(),
            world_to_object: object_to_world.inverted(),
            radius,
            object,
        }
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray<f32>) -> Option<Hit> {
        // Direction is not renormalized so t is shared with world space
        let Ray { o, d, t_max } = &self.world_to_object * *ray;

        let a = d.len_sqr();
        let b = 2.0 * (d.x * o.x + d.y * o.y + d.z * o.z);
        let c = o.x * o.x + o.y * o.y + o.z * o.z - self.radius * self.radius;

        let discrim = b * b - 4.0 * a * c;
        if discrim < 0.0 {
            return None;
        }
        let root = discrim.sqrt();

        let q = if b < 0.0 {
            -0.5 * (b - root)
        } else {
            -0.5 * (b + root)
        };

        let mut t0 = q / a;
        let mut t1 = c / q;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_max || t1 <= 0.0 {
            return None;
        }
        let mut t = t0;
        if t <= 0.0 {
            t = t1;
            if t > t_max {
                return None;
            }
        }

        let p_object = o + d * t;
        let n = (&self.object_to_world * Normal::from(Vec3::from(p_object))).normalized();

        Some(Hit {
            t,
            p: ray.point(t),
            n: n.face_forward(-ray.d),
            object: self.object,
        })
    }

    fn world_bound(&self) -> Bounds3<f32> {
        &self.object_to_world
            * Bounds3::new(Point3::splat(-self.radius), Point3::splat(self.radius))
    }

    fn object(&self) -> ObjectId {
        self.object
    }
}
