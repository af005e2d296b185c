use std::ops::{Index, IndexMut};

use super::{
    common::{FloatValueType, ValueType},
    vector::{Vec2, Vec3},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Points.html

// Some point ops don't make sense mathematically but are handy in weighted sums
// point + point = point
// point * scalar = point

/// A two-dimensional point. Pixel coordinates use `Point2<u32>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point2<T>
where
    T: ValueType,
{
    pub x: T,
    pub y: T,
}

/// A three-dimensional point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point3<T>
where
    T: ValueType,
{
    pub x: T,
    pub y: T,
    pub z: T,
}

impl_vec_like!(Point2 { x, y });
impl_binop!(Add add, Point2, Vec2 => Point2 { x, y });
impl_binop!(Sub sub, Point2, Vec2 => Point2 { x, y });
impl_binop!(Sub sub, Point2, Point2 => Vec2 { x, y });

impl_vec_like!(Point3 { x, y, z });
impl_binop!(Add add, Point3, Vec3 => Point3 { x, y, z });
impl_binop!(Add add, Point3, Point3 => Point3 { x, y, z });
impl_binop!(Sub sub, Point3, Vec3 => Point3 { x, y, z });
impl_binop!(Sub sub, Point3, Point3 => Vec3 { x, y, z });
impl_assign_op!(AddAssign add_assign, Point3, Vec3 { x, y, z });
impl_assign_op!(SubAssign sub_assign, Point3, Vec3 { x, y, z });

impl<T> Point3<T>
where
    T: FloatValueType,
{
    /// Finds the distance between this `Point3` and another.
    #[inline]
    pub fn dist(&self, other: Self) -> T {
        (*self - other).len()
    }
}

impl<T> Index<usize> for Point3<T>
where
    T: ValueType,
{
    type Output = T;

    fn index(&self, component: usize) -> &T {
        match component {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 component {} out of bounds", component),
        }
    }
}

impl<T> IndexMut<usize> for Point3<T>
where
    T: ValueType,
{
    fn index_mut(&mut self, component: usize) -> &mut T {
        match component {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Point3 component {} out of bounds", component),
        }
    }
}

impl<T> From<Vec3<T>> for Point3<T>
where
    T: ValueType,
{
    fn from(v: Vec3<T>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl<T> From<[T; 3]> for Point3<T>
where
    T: ValueType,
{
    fn from([x, y, z]: [T; 3]) -> Self {
        Self::new(x, y, z)
    }
}
