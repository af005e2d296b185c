use approx::AbsDiffEq;

use super::{common::FloatValueType, point::Point3, vector::Vec3};

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Geometry_and_Transformations/Rays.html

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<T>
where
    T: FloatValueType,
{
    /// Origin
    pub o: Point3<T>,
    /// Direction, unit length for rays that measure distance in `t`
    pub d: Vec3<T>,
    /// Maximum `t` considered along the ray
    pub t_max: T,
}

impl<T> Ray<T>
where
    T: FloatValueType,
{
    /// Creates a new `Ray`.
    pub fn new(o: Point3<T>, d: Vec3<T>, t_max: T) -> Self {
        let ret = Self { o, d, t_max };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Checks if any of the members in this `Ray` contain NaNs.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Finds the [Point3] on this `Ray` at `t`.
    pub fn point(&self, t: T) -> Point3<T> {
        self.o + self.d * t
    }

    /// Returns a copy of this `Ray` limited to `t_max`.
    pub fn limited(&self, t_max: T) -> Self {
        Self::new(self.o, self.d, t_max)
    }
}

impl<T> AbsDiffEq for Ray<T>
where
    T: FloatValueType + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.o.abs_diff_eq(&other.o, epsilon)
            && self.d.abs_diff_eq(&other.d, epsilon)
            && self.t_max.abs_diff_eq(&other.t_max, epsilon)
    }
}
