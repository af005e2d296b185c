use num::cast::{FromPrimitive, ToPrimitive};
use num::traits::{Bounded, Float, Num};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Scalar types that can be stored in the math containers
pub trait ValueType:
    Num
    + Mini
    + Maxi
    + Bounded
    + PartialOrd
    + ToPrimitive
    + FromPrimitive
    + Copy
    + AddAssign
    + DivAssign
    + MulAssign
    + SubAssign
    + std::fmt::Debug
{
}

/// Floating point [ValueType]s
pub trait FloatValueType: ValueType + Float {}

impl<T> ValueType for T where
    T: Num
        + Mini
        + Maxi
        + Bounded
        + PartialOrd
        + ToPrimitive
        + FromPrimitive
        + Copy
        + AddAssign
        + DivAssign
        + MulAssign
        + SubAssign
        + std::fmt::Debug
{
}
impl<T> FloatValueType for T where T: ValueType + Float {}

/// Component-wise minimum that works the same for floats and integers
pub trait Mini {
    fn mini(&self, other: Self) -> Self;
}

/// Component-wise maximum that works the same for floats and integers
pub trait Maxi {
    fn maxi(&self, other: Self) -> Self;
}

// Floats have inherent min/max that handle NaNs, integers go through Ord
macro_rules! impl_min_max {
    (float: $( $t:ty ),+) => {
        $(
            impl Mini for $t {
                fn mini(&self, other: $t) -> $t {
                    <$t>::min(*self, other)
                }
            }
            impl Maxi for $t {
                fn maxi(&self, other: $t) -> $t {
                    <$t>::max(*self, other)
                }
            }
        )*
    };
    (int: $( $t:ty ),+) => {
        $(
            impl Mini for $t {
                fn mini(&self, other: $t) -> $t {
                    std::cmp::min(*self, other)
                }
            }
            impl Maxi for $t {
                fn maxi(&self, other: $t) -> $t {
                    std::cmp::max(*self, other)
                }
            }
        )*
    };
}
impl_min_max!(float: f32, f64);
impl_min_max!(int: u8, u16, u32, u64, usize, i8, i16, i32, i64);
