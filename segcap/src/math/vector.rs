use std::ops::{Index, IndexMut};

use super::{
    common::{FloatValueType, ValueType},
    normal::Normal,
    point::Point3,
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Vectors.html

/// A two-dimensional vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec2<T>
where
    T: ValueType,
{
    pub x: T,
    pub y: T,
}

/// A three-dimensional vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec3<T>
where
    T: ValueType,
{
    pub x: T,
    pub y: T,
    pub z: T,
}

impl_vec_like!(Vec2 { x, y });
impl_binop!(Add add, Vec2, Vec2 => Vec2 { x, y });
impl_binop!(Sub sub, Vec2, Vec2 => Vec2 { x, y });
impl_assign_op!(AddAssign add_assign, Vec2, Vec2 { x, y });
impl_assign_op!(SubAssign sub_assign, Vec2, Vec2 { x, y });

impl_vec_like!(Vec3 { x, y, z });
impl_binop!(Add add, Vec3, Vec3 => Vec3 { x, y, z });
impl_binop!(Sub sub, Vec3, Vec3 => Vec3 { x, y, z });
impl_assign_op!(AddAssign add_assign, Vec3, Vec3 { x, y, z });
impl_assign_op!(SubAssign sub_assign, Vec3, Vec3 { x, y, z });

impl<T> Vec3<T>
where
    T: ValueType,
{
    /// Finds the index of the maximum component in this `Vec3`.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        debug_assert!(!self.has_nans());

        if self.x > self.y && self.x > self.z {
            0
        } else if self.y > self.z {
            1
        } else {
            2
        }
    }

    /// Returns a `Vec3` with components picked from the given indices.
    #[inline]
    pub fn permuted(&self, x: usize, y: usize, z: usize) -> Self {
        Self::new(self[x], self[y], self[z])
    }
}

impl<T> Vec3<T>
where
    T: FloatValueType,
{
    /// Calculates the dot product of this `Vec3` and a [Normal].
    #[inline]
    pub fn dot_n(&self, n: Normal<T>) -> T {
        self.x * n.x + self.y * n.y + self.z * n.z
    }

    /// Calculates the cross product of this `Vec3` and another `Vec3`.
    //
    // Goes through f64 to avoid catastrophic cancellation.
    // http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Vectors.html#DotandCrossProduct
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        debug_assert!(!self.has_nans());
        debug_assert!(!other.has_nans());

        let [ax, ay, az] = [self.x, self.y, self.z].map(|v| v.to_f64().unwrap_or(f64::NAN));
        let [bx, by, bz] = [other.x, other.y, other.z].map(|v| v.to_f64().unwrap_or(f64::NAN));
        let narrow = |v: f64| T::from_f64(v).unwrap_or_else(T::nan);
        Self {
            x: narrow(ay * bz - az * by),
            y: narrow(az * bx - ax * bz),
            z: narrow(ax * by - ay * bx),
        }
    }
}

impl<T> Index<usize> for Vec3<T>
where
    T: ValueType,
{
    type Output = T;

    fn index(&self, component: usize) -> &T {
        match component {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 component {} out of bounds", component),
        }
    }
}

impl<T> IndexMut<usize> for Vec3<T>
where
    T: ValueType,
{
    fn index_mut(&mut self, component: usize) -> &mut T {
        match component {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 component {} out of bounds", component),
        }
    }
}

impl<T> From<Normal<T>> for Vec3<T>
where
    T: ValueType,
{
    fn from(n: Normal<T>) -> Self {
        Self::new(n.x, n.y, n.z)
    }
}

impl<T> From<Point3<T>> for Vec3<T>
where
    T: ValueType,
{
    fn from(p: Point3<T>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl<T> From<[T; 3]> for Vec3<T>
where
    T: ValueType,
{
    fn from([x, y, z]: [T; 3]) -> Self {
        Self::new(x, y, z)
    }
}
