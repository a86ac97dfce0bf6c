//! Scalar interpolation kernels used by keyframe curves.
//!
//! All three functions are total as long as the bracketing times differ;
//! curves guarantee this by refusing non-increasing sample times.
use super::common::Float;

/// Linear interpolation between `(t0, x0)` and `(t1, x1)` evaluated at `t`.
#[inline]
pub fn lerp(t0: Float, t1: Float, x0: Float, x1: Float, t: Float) -> Float {
    let u = (t - t0) / (t1 - t0);
    (1.0 - u) * x0 + u * x1
}

/// Cubic Hermite interpolation between `(t0, x0)` and `(t1, x1)` with endpoint
/// velocities `v0` and `v1`.
///
/// The velocities are applied in the normalized parameter `u` and are not
/// scaled by the segment duration. Curves tuned against this behaviour
/// (banking, arclength) depend on it, so it must stay that way.
#[inline]
pub fn hermite(t0: Float, t1: Float, x0: Float, x1: Float, v0: Float, v1: Float, t: Float) -> Float {
    let u = (t - t0) / (t1 - t0);
    let u2 = u * u;
    let u3 = u2 * u;
    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;
    x0 * h00 + x1 * h01 + v0 * h10 + v1 * h11
}

/// Catmull-Rom interpolation of the segment `(t1, x1) -> (t2, x2)` using the
/// outer control values `x0` and `x3` to derive the endpoint velocities.
/// Larger `tau` loosens the curve.
#[inline]
pub fn catmull_rom(
    tau: Float,
    t1: Float,
    t2: Float,
    x0: Float,
    x1: Float,
    x2: Float,
    x3: Float,
    t: Float
) -> Float {
    let v1 = tau * (x2 - x0);
    let v2 = tau * (x3 - x1);
    hermite(t1, t2, x1, x2, v1, v2, t)
}
