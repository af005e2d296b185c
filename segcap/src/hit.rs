use crate::{
    math::{Normal, Point3},
    scene::ObjectId,
};

/// Info of the nearest surface hit along a ray
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// Hit distance along the ray
    pub t: f32,
    /// World position
    pub p: Point3<f32>,
    /// Geometric normal facing the ray origin
    pub n: Normal<f32>,
    /// Scene object owning the surface
    pub object: ObjectId,
}
