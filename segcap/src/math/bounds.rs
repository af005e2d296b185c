use std::ops::Index;

use super::{
    common::{FloatValueType, ValueType},
    point::{Point2, Point3},
    ray::Ray,
    vector::{Vec2, Vec3},
};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Bounding_Boxes.html

/// Two-dimensional bounds. Both extents are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds2<T>
where
    T: ValueType,
{
    pub p_min: Point2<T>,
    pub p_max: Point2<T>,
}

/// Three-dimensional bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T>
where
    T: ValueType,
{
    pub p_min: Point3<T>,
    pub p_max: Point3<T>,
}

macro_rules! impl_bounds {
    ($name:ident, $point:ident, $vec:ident { $($c:ident),+ }) => {
        impl<T> $name<T>
        where
            T: ValueType,
        {
            /// Creates new bounds spanning the two points.
            pub fn new(p0: $point<T>, p1: $point<T>) -> Self {
                Self {
                    p_min: p0.min(p1),
                    p_max: p0.max(p1),
                }
            }

            /// Creates degenerate bounds around a single point.
            pub fn point(p: $point<T>) -> Self {
                Self { p_min: p, p_max: p }
            }

            /// Creates empty bounds that any union overrides.
            pub fn empty() -> Self {
                Self {
                    p_min: $point::splat(T::max_value()),
                    p_max: $point::splat(T::min_value()),
                }
            }

            /// Checks if these bounds contain no points.
            pub fn is_empty(&self) -> bool {
                false $(|| self.p_min.$c > self.p_max.$c)+
            }

            pub fn union_p(&self, p: $point<T>) -> Self {
                Self {
                    p_min: self.p_min.min(p),
                    p_max: self.p_max.max(p),
                }
            }

            pub fn union_b(&self, other: Self) -> Self {
                Self {
                    p_min: self.p_min.min(other.p_min),
                    p_max: self.p_max.max(other.p_max),
                }
            }

            /// Checks if `p` is inside these bounds, extents included.
            pub fn inside(&self, p: $point<T>) -> bool {
                true $(&& p.$c >= self.p_min.$c && p.$c <= self.p_max.$c)+
            }

            /// Returns the vector from `p_min` to `p_max`.
            pub fn diagonal(&self) -> $vec<T> {
                $vec { $($c: self.p_max.$c - self.p_min.$c),+ }
            }
        }

        impl<T> Default for $name<T>
        where
            T: ValueType,
        {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<T> Index<usize> for $name<T>
        where
            T: ValueType,
        {
            type Output = $point<T>;

            fn index(&self, i: usize) -> &$point<T> {
                match i {
                    0 => &self.p_min,
                    1 => &self.p_max,
                    _ => panic!("{} index {} out of bounds", stringify!($name), i),
                }
            }
        }
    };
}

impl_bounds!(Bounds2, Point2, Vec2 { x, y });
impl_bounds!(Bounds3, Point3, Vec3 { x, y, z });

impl<T> Bounds3<T>
where
    T: FloatValueType,
{
    /// Finds the axis with the largest extent
    pub fn maximum_extent(&self) -> usize {
        self.diagonal().max_dimension()
    }

    pub fn center(&self) -> Point3<T> {
        self.p_min + self.diagonal() * T::from_f32(0.5).unwrap_or_else(T::nan)
    }

    /// Checks if `ray` hits this `Bounds3` within `(0, ray.t_max)`.
    /// `inv_dir` and `dir_is_neg` are precomputed from `ray` as they stay the same for a traversal.
    pub fn intersect(&self, ray: &Ray<T>, inv_dir: Vec3<T>, dir_is_neg: [bool; 3]) -> bool {
        let mut t0 = T::zero();
        let mut t1 = ray.t_max;

        for axis in 0..3 {
            let near = self[dir_is_neg[axis] as usize][axis];
            let far = self[1 - (dir_is_neg[axis] as usize)][axis];
            let t_near = (near - ray.o[axis]) * inv_dir[axis];
            let t_far = (far - ray.o[axis]) * inv_dir[axis];

            // NaNs from 0 * inf on a slab boundary don't narrow the interval
            if t_near > t0 {
                t0 = t_near;
            }
            if t_far < t1 {
                t1 = t_far;
            }
            if t0 > t1 {
                return false;
            }
        }

        true
    }
}
