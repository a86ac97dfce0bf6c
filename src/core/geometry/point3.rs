use std::ops::*;
use num;
use super::super::common::Float;
use super::Vector3;

pub type Point3f = Point3<Float>;

/// A 3D Point.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[repr(C)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Point3<T> {
        Point3::<T>{x, y, z}
    }

    /// Create a new Point3 with all components 0.
    pub fn zero() -> Point3<T>
    where
    T: num::Zero
    {
        Point3::<T>{
            x: T::zero(),
            y: T::zero(),
            z: T::zero()
        }
    }

    /// Calculate the squared distance between two Point3.
    #[inline]
    pub fn distance_squared(&self, o: &Point3<T>) -> T
    where
    T: Copy + Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T>
    {
        (*self - *o).length_squared()
    }
}

impl Point3f {
    /// Calculate the distance between two Point3.
    #[inline]
    pub fn distance(&self, o: &Point3f) -> Float {
        self.distance_squared(o).sqrt()
    }
}

index_xyz!(Point3, u8);
index_xyz!(Point3, usize);

impl<T> Add<Vector3<T>> for Point3<T>
where
T: Add<T, Output = T>
{
    type Output = Point3<T>;
    fn add(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Point3<T>
where
T: AddAssign
{
    fn add_assign(&mut self, rhs: Vector3<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> Sub for Point3<T>
where
T: Sub<T, Output = T>
{
    type Output = Vector3<T>;
    fn sub(self, rhs: Point3<T>) -> Vector3<T> {
        Vector3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> Sub<Vector3<T>> for Point3<T>
where
T: Sub<T, Output = T>
{
    type Output = Point3<T>;
    fn sub(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> From<(T, T, T)> for Point3<T> {
    fn from(p: (T, T, T)) -> Point3<T> {
        Point3::<T>{
            x: p.0,
            y: p.1,
            z: p.2
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    fn from(v: Vector3<T>) -> Point3<T> {
        Point3::<T>{
            x: v.x,
            y: v.y,
            z: v.z
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_subtract_to_vectors() {
        let a = Point3f::new(1.0, 2.0, 3.0);
        let b = Point3f::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a + (b - a), b);
        assert_eq!(a.lerp(&b, 0.5), Point3f::new(2.5, 4.0, 3.0));
    }
}
