//! Orientation of a vehicle from the shape of its path.
//!
//! The body's forward axis is turned onto the travel direction, rolled so its
//! lateral axis stays horizontal, kept upright and optionally banked into turns
//! in proportion to how sharply the direction changes between frames.
use super::common::{Float, consts::PI, radians};
use super::geometry::{Point3f, Vector3f};
use super::options::SceneOptions;
use super::quaternion::Quaternion;

/// Largest bank angle, in degrees.
pub const MAX_BANK_ANGLE: Float = 45.0;

/// Horizontal direction to the left of `v`, or zero when `v` is vertical.
pub fn lateral(v: &Vector3f) -> Vector3f {
    Vector3f::Z.cross(v).normalize_or_zero()
}

/// Roll about `tangent` for a change of direction from `previous` to
/// `tangent` over `dt` seconds. Both tangents are raw frame differences.
pub fn bank_rotation(tangent: &Vector3f, previous: &Vector3f, dt: Float) -> Quaternion {
    let n = (*tangent - *previous) / dt;
    let mut angle = n.length();
    if lateral(tangent).dot(&n.normalize_or_zero()) > 0.0 {
        angle = -angle;
    }
    let angle = num::clamp(angle, -MAX_BANK_ANGLE, MAX_BANK_ANGLE);
    Quaternion::from_axis_angle(tangent, radians(angle))
}

/// Per-vehicle orientation settings derived from the scene options.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orienter {
    pub forward: Vector3f,
    pub frame_start: Float,
    /// Seconds per frame.
    pub frame_duration: Float,
    pub vertical_bob: bool,
    pub banking: bool
}

impl Orienter {
    /// `banking` is the vehicle's own flag; the scene wide flag is OR'd in.
    pub fn new(options: &SceneOptions, banking: bool) -> Orienter {
        Orienter {
            forward: options.forward,
            frame_start: options.window.start,
            frame_duration: options.frame_duration(),
            vertical_bob: options.has_vertical_bob(),
            banking: banking || options.banking
        }
    }

    /// Raw displacement over the frame ending at `frame`. The first frame of the
    /// window looks one frame ahead instead.
    pub fn tangent<F>(&self, position: &F, frame: Float) -> Vector3f
    where
    F: Fn(Float) -> Point3f
    {
        if frame <= self.frame_start {
            position(frame + 1.0) - position(frame)
        } else {
            position(frame) - position(frame - 1.0)
        }
    }

    /// Raw displacement over the frame before, zero for the first two frames.
    pub fn previous_tangent<F>(&self, position: &F, frame: Float) -> Vector3f
    where
    F: Fn(Float) -> Point3f
    {
        if frame < self.frame_start + 2.0 {
            Vector3f::zero()
        } else {
            position(frame - 1.0) - position(frame - 2.0)
        }
    }

    /// Orientation at `frame`, or None when the vehicle does not move over the
    /// frame and so has no direction of travel.
    pub fn orient<F>(&self, position: F, frame: Float) -> Option<Quaternion>
    where
    F: Fn(Float) -> Point3f
    {
        let raw = self.tangent(&position, frame);
        let tangent = raw.try_normalize()?;
        let mut q = self.align(&tangent);
        if self.banking {
            let previous = self.previous_tangent(&position, frame);
            q = bank_rotation(&raw, &previous, self.frame_duration) * q;
        }
        vlog!(3, "frame {}: tangent ({}, {}, {}) -> q ({}, {}, {}, {})",
            frame, tangent.x, tangent.y, tangent.z, q.w, q.v.x, q.v.y, q.v.z);
        Some(q)
    }

    /// Unbanked orientation facing along the unit `tangent`.
    pub fn align(&self, tangent: &Vector3f) -> Quaternion {
        let q_align = Quaternion::rotation_between(&self.forward, tangent);
        let body_lateral = q_align.rotate(&lateral(&self.forward));
        let q_rot = Quaternion::rotation_between(&body_lateral, &lateral(tangent));
        let mut q = q_rot * q_align;

        // Never let the body's up axis point below the horizon.
        if q.rotate(&Vector3f::Z).z < 0.0 {
            q = q * Quaternion::from_axis_angle(&Vector3f::Y, PI);
        }
        // Straight -Y travel on a flat route.
        if tangent.y == -1.0 && !self.vertical_bob {
            q = Quaternion::from_axis_angle(&Vector3f::Z, PI) * q;
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::FrameWindow;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vector3f, b: Vector3f) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-4);
    }

    fn orienter(banking: bool) -> Orienter {
        let options = SceneOptions {
            window: FrameWindow::new(0.0, 24.0),
            ..SceneOptions::default()
        };
        Orienter::new(&options, banking)
    }

    fn line(frame: Float) -> Point3f {
        Point3f::new(10.0 * frame / 24.0, 0.0, 0.0)
    }

    fn circle(frame: Float) -> Point3f {
        let a = frame * 0.1;
        Point3f::new(20.0 * a.cos(), 20.0 * a.sin(), 5.0)
    }

    #[test]
    fn straight_line_faces_travel_direction() {
        let o = orienter(false);
        for &frame in &[0.0, 1.0, 12.0, 24.0] {
            let q = o.orient(line, frame).unwrap();
            assert_vec_eq(q.rotate(&Vector3f::Y), Vector3f::X);
            assert!(q.rotate(&Vector3f::Z).z > 0.0);
        }
    }

    #[test]
    fn first_frame_looks_ahead() {
        let o = orienter(false);
        assert_vec_eq(o.tangent(&line, 0.0), Vector3f::new(10.0 / 24.0, 0.0, 0.0));
        assert_eq!(o.previous_tangent(&line, 1.0), Vector3f::zero());
        assert!(o.previous_tangent(&line, 2.0).length() > 0.0);
    }

    #[test]
    fn orientation_is_unit_length() {
        for &banking in &[false, true] {
            let o = orienter(banking);
            for f in 0..24 {
                let q = o.orient(circle, f as Float).unwrap();
                assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-4);
                let q = o.orient(|t| Point3f::new(t * t, (t * 0.3).sin() * 4.0, t * 0.5), f as Float).unwrap();
                assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn up_axis_stays_above_the_horizon() {
        let o = orienter(false);
        let directions = [
            Vector3f::X, -Vector3f::X, Vector3f::Y, -Vector3f::Y,
            Vector3f::new(1.0, 1.0, 0.5).normalize(),
            Vector3f::new(-1.0, 0.2, -0.8).normalize(),
        ];
        for d in &directions {
            let q = o.align(d);
            assert!(q.rotate(&Vector3f::Z).z >= -1e-5, "up flipped for {:?}", d);
        }
    }

    #[test]
    fn disabled_banking_matches_identity_bank() {
        let plain = orienter(false);
        for f in 0..24 {
            let frame = f as Float;
            let q = plain.orient(circle, frame).unwrap();
            let tangent = plain.tangent(&circle, frame).normalize();
            let expected = Quaternion::identity() * plain.align(&tangent);
            assert!(q.same_rotation(&expected, 1e-5));
        }
    }

    #[test]
    fn banking_rolls_into_turns() {
        let plain = orienter(false);
        let banked = orienter(true);
        // Constant velocity has nothing to bank once past the first two frames.
        let q = banked.orient(line, 12.0).unwrap();
        assert!(q.same_rotation(&plain.orient(line, 12.0).unwrap(), 1e-5));

        // Turning left on the circle leans the body's up vector inwards.
        let frame = 12.0;
        let q = banked.orient(circle, frame).unwrap();
        let up = q.rotate(&Vector3f::Z);
        let inwards = Point3f::new(0.0, 0.0, 5.0) - circle(frame);
        assert!(up.dot(&inwards) > 0.0);
        assert!(!q.same_rotation(&plain.orient(circle, frame).unwrap(), 1e-4));
    }

    #[test]
    fn bank_angle_is_clamped() {
        let t = Vector3f::new(0.0, 1.0, 0.0);
        let previous = Vector3f::new(100.0, 0.0, 0.0);
        let q = bank_rotation(&t, &previous, 1.0 / 24.0);
        let angle = 2.0 * q.w.acos();
        assert_abs_diff_eq!(angle, radians(MAX_BANK_ANGLE), epsilon = 1e-4);
        assert_eq!(bank_rotation(&t, &t, 1.0 / 24.0), Quaternion::identity());
    }

    #[test]
    fn stationary_vehicle_has_no_direction() {
        let o = orienter(true);
        assert!(o.orient(|_| Point3f::new(1.0, 2.0, 3.0), 5.0).is_none());
    }

    #[test]
    fn flat_minus_y_travel_is_turned_about_z() {
        let o = orienter(false);
        let flat = Orienter { vertical_bob: false, ..o };
        let bobbing = Orienter { vertical_bob: true, ..o };
        let tangent = -Vector3f::Y;
        let expected = Quaternion::from_axis_angle(&Vector3f::Z, PI) * bobbing.align(&tangent);
        assert!(flat.align(&tangent).same_rotation(&expected, 1e-5));
    }
}
