//! Position evaluation: three independent keyframe curves, one per world axis.
use super::common::Float;
use super::curve::{Curve, Interpolation, Sample};
use super::error::{CityError, Result};
use super::geometry::Point3f;

/// Keyframed path of a vehicle. Each axis keeps its own sample times.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub x: Curve,
    pub y: Curve,
    pub z: Curve
}

impl Trajectory {
    pub fn new(x: Curve, y: Curve, z: Curve) -> Trajectory {
        Trajectory { x, y, z }
    }

    /// Build a trajectory whose three axes share the same keyframe times.
    pub fn from_keyframes(keys: &[(Float, Point3f)]) -> Result<Trajectory> {
        let axis = |index: usize| -> Result<Curve> {
            Curve::new(keys.iter().map(|&(t, p)| Sample::new(t, p[index])).collect())
        };
        Ok(Trajectory {
            x: axis(0)?,
            y: axis(1)?,
            z: axis(2)?
        })
    }

    /// Curve driving axis `index` (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, index: usize) -> Result<&Curve> {
        match index {
            0 => Ok(&self.x),
            1 => Ok(&self.y),
            2 => Ok(&self.z),
            _ => Err(CityError::InvalidAxis { index, limit: 3 }),
        }
    }

    /// Position at raw time `t`.
    pub fn evaluate(&self, t: Float, interpolation: &Interpolation) -> Point3f {
        Point3f::new(
            self.x.evaluate(t, interpolation),
            self.y.evaluate(t, interpolation),
            self.z.evaluate(t, interpolation)
        )
    }

    /// Earliest and latest keyed time over all three axes.
    pub fn time_range(&self) -> (Float, Float) {
        let curves = [&self.x, &self.y, &self.z];
        let start = curves.iter().map(|c| c.start_time()).fold(Float::INFINITY, Float::min);
        let end = curves.iter().map(|c| c.end_time()).fold(Float::NEG_INFINITY, Float::max);
        (start, end)
    }
}
