use std::ops::*;
use num;
use super::super::common::{Float, consts::DEGENERATE_LENGTH};
use super::Point3;

pub type Vector3f = Vector3<Float>;

/// Representation of a 3D Vector.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[repr(C)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Vector3<T> {
        Vector3::<T>{x, y, z}
    }

    #[inline]
    pub fn zero() -> Vector3<T>
    where
    T: num::Zero
    {
        Vector3::<T>{x: T::zero(), y: T::zero(), z: T::zero()}
    }

    /// Calculate the squared length of the Vector3.
    #[inline]
    pub fn length_squared(&self) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Calculate the dot product of two Vector3.
    pub fn dot(&self, o: &Vector3<T>) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    /// Calculate the cross product of two Vector3
    pub fn cross(&self, o: &Vector3<T>) -> Vector3<T>
    where
    T: Copy + Sub<T, Output = T> + Mul<T, Output = T>
    {
        Vector3::<T>{
            x: (self.y * o.z) - (self.z * o.y),
            y: (self.z * o.x) - (self.x * o.z),
            z: (self.x * o.y) - (self.y * o.x)
        }
    }
}

impl Vector3f {
    /// Unit vector along +X.
    pub const X: Vector3f = Vector3f{x: 1.0, y: 0.0, z: 0.0};
    /// Unit vector along +Y.
    pub const Y: Vector3f = Vector3f{x: 0.0, y: 1.0, z: 0.0};
    /// World up.
    pub const Z: Vector3f = Vector3f{x: 0.0, y: 0.0, z: 1.0};

    /// Calculate the length of the Vector3.
    #[inline]
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the Vector3 normalized to unit length.
    /// The vector must not be degenerate, see `try_normalize`.
    pub fn normalize(&self) -> Vector3f {
        *self / self.length()
    }

    /// Returns the normalized vector, or None when its length is too close to zero
    /// to define a direction.
    pub fn try_normalize(&self) -> Option<Vector3f> {
        let length = self.length();
        if length > DEGENERATE_LENGTH && length.is_finite() {
            Some(*self / length)
        } else {
            None
        }
    }

    /// Like `try_normalize` but degenerate vectors stay zero.
    pub fn normalize_or_zero(&self) -> Vector3f {
        self.try_normalize().unwrap_or_default()
    }

    /// Any unit vector perpendicular to this one.
    pub fn any_orthogonal(&self) -> Vector3f {
        // Cross with the axis the vector is least aligned with.
        let axis = if self.x.abs() <= self.y.abs() && self.x.abs() <= self.z.abs() {
            Vector3f::X
        } else if self.y.abs() <= self.z.abs() {
            Vector3f::Y
        } else {
            Vector3f::Z
        };
        self.cross(&axis).try_normalize().unwrap_or(Vector3f::Z)
    }
}

index_xyz!(Vector3, u8);
index_xyz!(Vector3, usize);

impl<T> Neg for Vector3<T>
where
T: Neg<Output = T>
{
    type Output = Self;

    fn neg(self) -> Vector3<T> {
        Vector3::<T>{
            x: -self.x,
            y: -self.y,
            z: -self.z
        }
    }
}

impl Div<Float> for Vector3<Float>
{
    type Output = Self;
    #[inline]
    fn div(self, rhs: Float) -> Self {
        let inv = 1.0 / rhs;
        Vector3::<Float>{
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv
        }
    }
}

impl<T> Mul<T> for Vector3<T>
where
T: Copy + Mul<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Vector3::<T>{
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs
        }
    }
}

reverse_mul_scalar!(Vector3, {x, y, z});

impl<T> MulAssign<T> for Vector3<T>
where
T: Copy + MulAssign
{
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl<T> Add<Vector3<T>> for Vector3<T>
where
T: Add<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Vector3<T>
where
T: AddAssign
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> Sub<Vector3<T>> for Vector3<T>
where
T: Sub<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> SubAssign<Vector3<T>> for Vector3<T>
where
T: SubAssign
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T> From<(T, T, T)> for Vector3<T> {
    fn from(v: (T, T, T)) -> Vector3<T> {
        Vector3::<T>{
            x: v.0,
            y: v.1,
            z: v.2
        }
    }
}

impl<T> From<[T; 3]> for Vector3<T>
where
T: Copy
{
    fn from(v: [T; 3]) -> Vector3<T> {
        Vector3::<T>{
            x: v[0],
            y: v[1],
            z: v[2]
        }
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    fn from(p: Point3<T>) -> Vector3<T> {
        Vector3::<T>{
            x: p.x,
            y: p.y,
            z: p.z
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vector3f::X.cross(&Vector3f::Y), Vector3f::Z);
        assert_eq!(Vector3f::Z.cross(&Vector3f::X), Vector3f::Y);
        assert_eq!(Vector3f::Y.cross(&Vector3f::X), -Vector3f::Z);
    }

    #[test]
    fn degenerate_vectors_do_not_normalize() {
        assert_eq!(Vector3f::zero().try_normalize(), None);
        assert_eq!(Vector3f::zero().normalize_or_zero(), Vector3f::zero());
        let n = Vector3f::new(3.0, 0.0, 4.0).try_normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_is_perpendicular() {
        for v in &[Vector3f::X, Vector3f::Y, Vector3f::Z, Vector3f::new(1.0, 2.0, -3.0)] {
            let o = v.any_orthogonal();
            assert!(o.dot(v).abs() < 1e-5);
            assert!((o.length() - 1.0).abs() < 1e-5);
        }
    }
}
