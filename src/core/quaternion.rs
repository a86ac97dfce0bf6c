use super::common::{Float, consts::PI};
use super::geometry::Vector3f;
use std::ops::Mul;

/// Rotation quaternion with vector part `v` and scalar part `w`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Quaternion {
    pub v: Vector3f,
    pub w: Float
}

impl Quaternion {
    /// Number of scalar components exposed to the host.
    pub const COMPONENTS: usize = 4;

    pub fn new(x: Float, y: Float, z: Float, w: Float) -> Quaternion {
        Quaternion{
            v: Vector3f{x, y, z},
            w
        }
    }

    pub fn identity() -> Quaternion {
        Quaternion::default()
    }

    /// Rotation of `angle` radians about `axis`. The axis does not need to be
    /// normalized; a zero axis yields the identity rotation.
    pub fn from_axis_angle(axis: &Vector3f, angle: Float) -> Quaternion {
        match axis.try_normalize() {
            Some(axis) => {
                let half = angle * 0.5;
                Quaternion{
                    v: axis * half.sin(),
                    w: half.cos()
                }
            }
            None => Quaternion::identity()
        }
    }

    /// Shortest rotation taking direction `from` onto direction `to`.
    /// Both inputs are expected to be unit length or zero. Parallel inputs give
    /// the identity, opposite inputs a half turn about an axis perpendicular to
    /// `from`, and a zero input the identity.
    pub fn rotation_between(from: &Vector3f, to: &Vector3f) -> Quaternion {
        let cos_theta = from.dot(to);
        match from.cross(to).try_normalize() {
            Some(axis) => {
                let theta = num::clamp(cos_theta, -1.0, 1.0).acos();
                Quaternion::from_axis_angle(&axis, theta)
            }
            None if cos_theta < 0.0 => Quaternion::from_axis_angle(&from.any_orthogonal(), PI),
            None => Quaternion::identity()
        }
    }

    /// Calculate the dot product between this Quaternion and another.
    pub fn dot(&self, q2: &Quaternion) -> Float {
        self.v.dot(&q2.v) + self.w * q2.w
    }

    pub fn length(&self) -> Float {
        self.dot(self).sqrt()
    }

    /// Rotate a vector by this (unit) Quaternion.
    pub fn rotate(&self, v: &Vector3f) -> Vector3f {
        let t = self.v.cross(v) * 2.0;
        *v + t * self.w + self.v.cross(&t)
    }

    /// Scalar component in host order: 0 = w, 1 = x, 2 = y, 3 = z.
    pub fn component(&self, index: usize) -> Option<Float> {
        match index {
            0 => Some(self.w),
            1 => Some(self.v.x),
            2 => Some(self.v.y),
            3 => Some(self.v.z),
            _ => None
        }
    }

    /// True when both quaternions describe the same rotation within `epsilon`,
    /// accounting for `q` and `-q` being equivalent.
    pub fn same_rotation(&self, other: &Quaternion, epsilon: Float) -> bool {
        (self.dot(other).abs() - 1.0).abs() <= epsilon
    }
}

impl Default for Quaternion {
    fn default() -> Quaternion {
        Quaternion{
            v: Vector3f::default(),
            w: 1.0
        }
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion{
            v: rhs.v * self.w + self.v * rhs.w + self.v.cross(&rhs.v),
            w: self.w * rhs.w - self.v.dot(&rhs.v)
        }
    }
}
