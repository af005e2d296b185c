use super::{
    common::{FloatValueType, ValueType},
    vector::Vec3,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Normals.html

/// A three-dimensional surface normal
///
/// Not necessarily normalized, it is merely perpendicular to a surface at a point on it.
/// Transforms treat it differently from a [Vec3].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normal<T>
where
    T: ValueType,
{
    pub x: T,
    pub y: T,
    pub z: T,
}

impl_vec_like!(Normal { x, y, z });
impl_binop!(Add add, Normal, Normal => Normal { x, y, z });

impl<T> Normal<T>
where
    T: FloatValueType,
{
    /// Flips this `Normal` to lie in the same hemisphere as `v`.
    #[inline]
    pub fn face_forward(&self, v: Vec3<T>) -> Self {
        if v.dot_n(*self) < T::zero() {
            -*self
        } else {
            *self
        }
    }
}

impl<T> From<Vec3<T>> for Normal<T>
where
    T: ValueType,
{
    fn from(v: Vec3<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
