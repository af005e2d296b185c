use std::ops::Mul;

use super::common::FloatValueType;

// Based on Physically Based Rendering 3rd ed.
// http://www.pbr-book.org/3ed-2018/Utilities/Mathematical_Routines.html#Matrix4x4

/// A row-major 4x4 matrix
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4<T>
where
    T: FloatValueType,
{
    /// Raw values in row-major order.
    pub m: [[T; 4]; 4],
}

impl<T> Matrix4x4<T>
where
    T: FloatValueType,
{
    pub fn new(m: [[T; 4]; 4]) -> Self {
        let ret = Self { m };
        debug_assert!(!ret.has_nans());
        ret
    }

    pub fn identity() -> Self {
        let mut m = [[T::zero(); 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = T::one();
        }
        Self { m }
    }

    pub fn has_nans(&self) -> bool {
        self.m.iter().flatten().any(|v| v.is_nan())
    }

    pub fn transposed(&self) -> Self {
        let mut m = self.m;
        for (row, values) in m.iter_mut().enumerate() {
            for (col, v) in values.iter_mut().enumerate() {
                *v = self.m[col][row];
            }
        }
        Self { m }
    }
}

// By ref since these are copied around a lot otherwise
impl<'a, 'b, T> Mul<&'b Matrix4x4<T>> for &'a Matrix4x4<T>
where
    T: FloatValueType,
{
    type Output = Matrix4x4<T>;

    fn mul(self, other: &'b Matrix4x4<T>) -> Matrix4x4<T> {
        let mut m = [[T::zero(); 4]; 4];
        for (row, values) in m.iter_mut().enumerate() {
            for (col, v) in values.iter_mut().enumerate() {
                *v = (0..4).fold(T::zero(), |acc, k| acc + self.m[row][k] * other.m[k][col]);
            }
        }
        Matrix4x4::new(m)
    }
}
