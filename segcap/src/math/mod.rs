// Component-wise boilerplate shared by the vector-like types.
// The per-type files only list which cross-type operators make sense.
macro_rules! impl_vec_like {
    ($name:ident { $($c:ident),+ }) => {
        impl<T> $name<T>
        where
            T: ValueType,
        {
            /// Creates a new value from its components.
            #[inline]
            pub fn new($($c: T),+) -> Self {
                let ret = Self { $($c),+ };
                debug_assert!(!ret.has_nans());
                ret
            }

            /// Creates a new value with all components set to `v`.
            #[inline]
            pub fn splat(v: T) -> Self {
                Self { $($c: v),+ }
            }

            #[inline]
            pub fn zeros() -> Self {
                Self::splat(T::zero())
            }

            #[inline]
            pub fn ones() -> Self {
                Self::splat(T::one())
            }

            /// Checks if any of the components is NaN.
            #[inline]
            #[allow(clippy::eq_op)]
            pub fn has_nans(&self) -> bool {
                // Integers are never NaN, floats are never equal to themselves when they are
                false $(|| self.$c != self.$c)+
            }

            /// Component-wise minimum.
            #[inline]
            pub fn min(&self, other: Self) -> Self {
                Self { $($c: self.$c.mini(other.$c)),+ }
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(&self, other: Self) -> Self {
                Self { $($c: self.$c.maxi(other.$c)),+ }
            }

            #[inline]
            pub fn dot(&self, other: Self) -> T {
                T::zero() $(+ self.$c * other.$c)+
            }

            #[inline]
            pub fn len_sqr(&self) -> T {
                self.dot(*self)
            }
        }

        impl<T> $name<T>
        where
            T: FloatValueType,
        {
            #[inline]
            pub fn len(&self) -> T {
                self.len_sqr().sqrt()
            }

            /// Returns a unit length copy. The length has to be non-zero.
            #[inline]
            pub fn normalized(&self) -> Self {
                let len = self.len();
                debug_assert!(len > T::zero());
                *self / len
            }

            #[inline]
            pub fn abs(&self) -> Self {
                Self { $($c: self.$c.abs()),+ }
            }
        }

        impl<T> std::ops::Mul<T> for $name<T>
        where
            T: ValueType,
        {
            type Output = Self;

            #[inline]
            fn mul(self, s: T) -> Self {
                Self { $($c: self.$c * s),+ }
            }
        }

        impl<T> std::ops::Div<T> for $name<T>
        where
            T: ValueType,
        {
            type Output = Self;

            #[inline]
            fn div(self, s: T) -> Self {
                Self { $($c: self.$c / s),+ }
            }
        }

        impl<T> std::ops::MulAssign<T> for $name<T>
        where
            T: ValueType,
        {
            #[inline]
            fn mul_assign(&mut self, s: T) {
                $(self.$c *= s;)+
            }
        }

        impl<T> std::ops::DivAssign<T> for $name<T>
        where
            T: ValueType,
        {
            #[inline]
            fn div_assign(&mut self, s: T) {
                $(self.$c /= s;)+
            }
        }

        impl<T> std::ops::Neg for $name<T>
        where
            T: ValueType + std::ops::Neg<Output = T>,
        {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($c: -self.$c),+ }
            }
        }

        impl<T> approx::AbsDiffEq for $name<T>
        where
            T: ValueType + approx::AbsDiffEq<Epsilon = T>,
        {
            type Epsilon = T;

            fn default_epsilon() -> T {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                true $(&& self.$c.abs_diff_eq(&other.$c, epsilon))+
            }
        }

        impl<T> approx::RelativeEq for $name<T>
        where
            T: ValueType + approx::RelativeEq + approx::AbsDiffEq<Epsilon = T>,
        {
            fn default_max_relative() -> T {
                T::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                true $(&& self.$c.relative_eq(&other.$c, epsilon, max_relative))+
            }
        }
    };
}

// `Lhs op Rhs = Out` for types that share component names
macro_rules! impl_binop {
    ($tr:ident $fn_name:ident, $lhs:ident, $rhs:ident => $out:ident { $($c:ident),+ }) => {
        impl<T> std::ops::$tr<$rhs<T>> for $lhs<T>
        where
            T: ValueType,
        {
            type Output = $out<T>;

            #[inline]
            fn $fn_name(self, other: $rhs<T>) -> $out<T> {
                $out { $($c: std::ops::$tr::$fn_name(self.$c, other.$c)),+ }
            }
        }
    };
}

// `Lhs op= Rhs`
macro_rules! impl_assign_op {
    ($tr:ident $fn_name:ident, $lhs:ident, $rhs:ident { $($c:ident),+ }) => {
        impl<T> std::ops::$tr<$rhs<T>> for $lhs<T>
        where
            T: ValueType,
        {
            #[inline]
            fn $fn_name(&mut self, other: $rhs<T>) {
                $(std::ops::$tr::$fn_name(&mut self.$c, other.$c);)+
            }
        }
    };
}

mod bounds;
mod common;
mod matrix;
mod normal;
mod point;
mod ray;
mod transform;
pub mod transforms;
mod vector;

pub use bounds::{Bounds2, Bounds3};
pub use common::{FloatValueType, ValueType};
pub use matrix::Matrix4x4;
pub use normal::Normal;
pub use point::{Point2, Point3};
pub use ray::Ray;
pub use transform::Transform;
pub use vector::{Vec2, Vec3};

/// Linearly interpolates between `a` and `b`, `t` = 0 giving `a`.
#[inline]
pub fn lerp<T>(t: T, a: Point3<T>, b: Point3<T>) -> Point3<T>
where
    T: FloatValueType,
{
    a + (b - a) * t
}
