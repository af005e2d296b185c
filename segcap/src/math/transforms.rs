use super::{common::FloatValueType, matrix::Matrix4x4, vector::Vec3, Transform};

/// Creates a new [Transform] that is a translation by `delta`.
pub fn translation<T>(delta: Vec3<T>) -> Transform<T>
where
    T: FloatValueType,
{
    let mut m = Matrix4x4::identity();
    let mut m_inv = Matrix4x4::identity();
    for axis in 0..3 {
        m.m[axis][3] = delta[axis];
        m_inv.m[axis][3] = -delta[axis];
    }

    Transform::new_full(m, m_inv)
}

/// Creates a new [Transform] that scales by `s` per axis. All components have to be non-zero.
pub fn scale<T>(s: Vec3<T>) -> Transform<T>
where
    T: FloatValueType,
{
    debug_assert!(s.x != T::zero() && s.y != T::zero() && s.z != T::zero());

    let mut m = Matrix4x4::identity();
    let mut m_inv = Matrix4x4::identity();
    for axis in 0..3 {
        m.m[axis][axis] = s[axis];
        m_inv.m[axis][axis] = T::one() / s[axis];
    }

    Transform::new_full(m, m_inv)
}

// Rotations are orthonormal so the inverse is the transpose
fn rotation_from<T>(m: Matrix4x4<T>) -> Transform<T>
where
    T: FloatValueType,
{
    Transform::new_full(m, m.transposed())
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the x-axis.
pub fn rotation_x<T>(theta: T) -> Transform<T>
where
    T: FloatValueType,
{
    let (sin, cos) = theta.sin_cos();
    let (o, l) = (T::zero(), T::one());
    rotation_from(Matrix4x4::new([
        [l, o, o, o],
        [o, cos, -sin, o],
        [o, sin, cos, o],
        [o, o, o, l],
    ]))
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the y-axis.
///
/// Positive angles turn +Z towards +X.
pub fn rotation_y<T>(theta: T) -> Transform<T>
where
    T: FloatValueType,
{
    let (sin, cos) = theta.sin_cos();
    let (o, l) = (T::zero(), T::one());
    rotation_from(Matrix4x4::new([
        [cos, o, sin, o],
        [o, l, o, o],
        [-sin, o, cos, o],
        [o, o, o, l],
    ]))
}

/// Creates a new [Transform] that is a rotation of `theta` radians around the z-axis.
pub fn rotation_z<T>(theta: T) -> Transform<T>
where
    T: FloatValueType,
{
    let (sin, cos) = theta.sin_cos();
    let (o, l) = (T::zero(), T::one());
    rotation_from(Matrix4x4::new([
        [cos, -sin, o, o],
        [sin, cos, o, o],
        [o, o, l, o],
        [o, o, o, l],
    ]))
}

/// Creates a new [Transform] from euler angles in degrees.
///
/// Roll around z is applied first, then pitch around x and finally yaw around y.
pub fn rotation_euler<T>(degrees: Vec3<T>) -> Transform<T>
where
    T: FloatValueType,
{
    let yaw = rotation_y(degrees.y.to_radians());
    let pitch = rotation_x(degrees.x.to_radians());
    let roll = rotation_z(degrees.z.to_radians());
    &yaw * &(&pitch * &roll)
}
