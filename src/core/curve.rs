//! Keyframe curves: one scalar channel of motion sampled at strictly
//! increasing times, with boundary-aware lookup of the bracketing samples.
use std::fmt;
use std::str::FromStr;
use super::common::{Float, partition_point};
use super::error::{CityError, Result};
use super::interpolation::{lerp, hermite, catmull_rom};

/// Scheme used to fill in values between keyframes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    Linear,
    Hermite,
    CatmullRom
}

impl Default for InterpolationMode {
    fn default() -> InterpolationMode {
        InterpolationMode::Linear
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterpolationMode::Linear => write!(f, "LINEAR"),
            InterpolationMode::Hermite => write!(f, "HERMITE"),
            InterpolationMode::CatmullRom => write!(f, "CATMULL"),
        }
    }
}

impl FromStr for InterpolationMode {
    type Err = CityError;

    fn from_str(s: &str) -> Result<InterpolationMode> {
        match s.to_ascii_uppercase().as_str() {
            "LINEAR" | "LINEAL" => Ok(InterpolationMode::Linear),
            "HERMITE" => Ok(InterpolationMode::Hermite),
            "CATMULL" | "CATMULL-ROM" | "CATMULLROM" => Ok(InterpolationMode::CatmullRom),
            other => Err(CityError::InvalidConfig(format!("unknown interpolation method \"{}\"", other))),
        }
    }
}

/// Everything a curve needs to know to interpolate between its samples.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interpolation {
    pub mode: InterpolationMode,
    /// Catmull-Rom tension.
    pub tau: Float,
    /// Factor turning the height difference of a key's tangent handles into a
    /// Hermite velocity. The default of 15 assumes a 24 frames per second time base.
    pub handle_gain: Float
}

impl Interpolation {
    pub const DEFAULT_TAU: Float = 0.1;
    pub const DEFAULT_HANDLE_GAIN: Float = 15.0;

    pub fn new(mode: InterpolationMode) -> Interpolation {
        Interpolation {
            mode,
            ..Interpolation::default()
        }
    }

    pub fn linear() -> Interpolation {
        Interpolation::new(InterpolationMode::Linear)
    }
}

impl Default for Interpolation {
    fn default() -> Interpolation {
        Interpolation {
            mode: InterpolationMode::Linear,
            tau: Interpolation::DEFAULT_TAU,
            handle_gain: Interpolation::DEFAULT_HANDLE_GAIN
        }
    }
}

/// A keyframe. Handles are the values of the key's incoming and outgoing
/// tangent handles; when absent they are derived from the neighbouring keys.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub time: Float,
    pub value: Float,
    pub handle_left: Option<Float>,
    pub handle_right: Option<Float>
}

impl Sample {
    pub fn new(time: Float, value: Float) -> Sample {
        Sample {
            time,
            value,
            handle_left: None,
            handle_right: None
        }
    }

    pub fn with_handles(time: Float, value: Float, handle_left: Float, handle_right: Float) -> Sample {
        Sample {
            time,
            value,
            handle_left: Some(handle_left),
            handle_right: Some(handle_right)
        }
    }
}

impl From<(Float, Float)> for Sample {
    fn from(p: (Float, Float)) -> Sample {
        Sample::new(p.0, p.1)
    }
}

/// An immutable, time ordered sequence of samples for one scalar channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    samples: Vec<Sample>,
    forced_mode: Option<InterpolationMode>
}

impl Curve {
    /// Build a curve, refusing empty input, non-finite data and times that are
    /// not strictly increasing.
    pub fn new(samples: Vec<Sample>) -> Result<Curve> {
        if samples.is_empty() {
            return Err(CityError::MalformedCurve("curve needs at least one sample".to_string()));
        }
        for (i, s) in samples.iter().enumerate() {
            if !s.time.is_finite() || !s.value.is_finite() {
                return Err(CityError::MalformedCurve(format!(
                    "sample {} is not finite: ({}, {})", i, s.time, s.value)));
            }
        }
        for (i, pair) in samples.windows(2).enumerate() {
            if pair[0].time >= pair[1].time {
                return Err(CityError::MalformedCurve(format!(
                    "sample times must strictly increase: {} then {} at index {}",
                    pair[0].time, pair[1].time, i + 1)));
            }
        }
        Ok(Curve {
            samples,
            forced_mode: None
        })
    }

    /// Build a curve from `(time, value)` pairs.
    pub fn from_points(points: &[(Float, Float)]) -> Result<Curve> {
        Curve::new(points.iter().map(|&p| Sample::from(p)).collect())
    }

    /// A curve holding a single value for all time.
    pub fn constant(value: Float) -> Curve {
        Curve {
            samples: vec![Sample::new(0.0, value)],
            forced_mode: None
        }
    }

    /// Interpolate this curve linearly whatever mode is requested.
    pub fn force_linear(mut self) -> Curve {
        self.forced_mode = Some(InterpolationMode::Linear);
        self
    }

    pub fn forced_mode(&self) -> Option<InterpolationMode> {
        self.forced_mode
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn start_time(&self) -> Float {
        self.first().time
    }

    pub fn end_time(&self) -> Float {
        self.last().time
    }

    /// Index of the first sample whose time is not before `t`.
    /// 0 means `t` is at or before the first key, `len()` that it is past the last one.
    pub fn bracket(&self, t: Float) -> usize {
        partition_point(self.samples.len(), |i| self.samples[i].time < t)
    }

    /// Value of the curve at `t`. Queries outside the keyed range clamp to the
    /// first or last value.
    pub fn evaluate(&self, t: Float, interpolation: &Interpolation) -> Float {
        let i = self.bracket(t);
        if i == 0 {
            return self.first().value;
        }
        if i >= self.samples.len() {
            return self.last().value;
        }
        let a = &self.samples[i - 1];
        let b = &self.samples[i];
        match self.forced_mode.unwrap_or(interpolation.mode) {
            InterpolationMode::Linear => lerp(a.time, b.time, a.value, b.value, t),
            InterpolationMode::Hermite => {
                let v0 = interpolation.handle_gain * self.handle_span(i - 1);
                let v1 = interpolation.handle_gain * self.handle_span(i);
                hermite(a.time, b.time, a.value, b.value, v0, v1, t)
            }
            InterpolationMode::CatmullRom => {
                let (x0, x1, x2, x3) = self.catmull_rom_controls(i);
                catmull_rom(interpolation.tau, a.time, b.time, x0, x1, x2, x3, t)
            }
        }
    }

    /// Value at `t` using linear segments, or the forced mode.
    pub fn value_at(&self, t: Float) -> Float {
        self.evaluate(t, &Interpolation::linear())
    }

    /// Height difference between the right and left tangent handles of key `k`.
    pub fn handle_span(&self, k: usize) -> Float {
        let s = &self.samples[k];
        let (auto_left, auto_right) = self.auto_handles(k);
        s.handle_right.unwrap_or(auto_right) - s.handle_left.unwrap_or(auto_left)
    }

    /// Auto-clamped handles: flat at the ends and at local extrema, otherwise
    /// following the slope through the neighbours, reaching a third of the way
    /// into each adjacent segment.
    fn auto_handles(&self, k: usize) -> (Float, Float) {
        let s = &self.samples[k];
        if k == 0 || k + 1 >= self.samples.len() {
            return (s.value, s.value);
        }
        let prev = &self.samples[k - 1];
        let next = &self.samples[k + 1];
        if (s.value - prev.value) * (next.value - s.value) <= 0.0 {
            return (s.value, s.value);
        }
        let slope = (next.value - prev.value) / (next.time - prev.time);
        (
            s.value - slope * (s.time - prev.time) / 3.0,
            s.value + slope * (next.time - s.time) / 3.0
        )
    }

    /// Control values for the Catmull-Rom segment ending at key `i`
    /// (`0 < i < len`). Missing outer keys are replaced by the nearest inner one.
    fn catmull_rom_controls(&self, i: usize) -> (Float, Float, Float, Float) {
        let x = |k: usize| self.samples[k].value;
        let n = self.samples.len();
        if n == 2 {
            (x(0), x(0), x(1), x(1))
        } else if i < 2 {
            (x(i - 1), x(i - 1), x(i), x(i + 1))
        } else if i + 3 > n {
            (x(i - 2), x(i - 1), x(i), x(i))
        } else {
            (x(i - 2), x(i - 1), x(i), x(i + 1))
        }
    }

    /// True when values never decrease with time.
    pub fn is_non_decreasing(&self) -> bool {
        self.samples.windows(2).all(|pair| pair[1].value >= pair[0].value)
    }
}
