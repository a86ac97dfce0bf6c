use super::common::Float;
use super::curve::{Interpolation, InterpolationMode};
use super::error::{CityError, Result};
use super::geometry::Vector3f;

/// Inclusive range of animation frames the vehicles are evaluated over.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameWindow {
    pub start: Float,
    pub end: Float
}

impl FrameWindow {
    pub fn new(start: Float, end: Float) -> FrameWindow {
        FrameWindow { start, end }
    }

    /// Clamp a query frame into the window.
    pub fn clamp(&self, frame: Float) -> Float {
        num::clamp(frame, self.start, self.end)
    }

    /// Number of whole frames covered, both ends included.
    pub fn frame_count(&self) -> usize {
        (self.end - self.start).floor() as usize + 1
    }
}

impl Default for FrameWindow {
    fn default() -> FrameWindow {
        FrameWindow {
            start: 0.0,
            end: 250.0
        }
    }
}

/// Global configuration read by every evaluation. It is only replaced between
/// animation runs, never while vehicles are being evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub interpolation: InterpolationMode,
    /// Catmull-Rom tension, in `[0, 10]`.
    pub tau: Float,
    /// Gain applied to tangent handle spans in Hermite mode.
    pub handle_gain: Float,
    /// Body axis of a vehicle model that should point along its travel direction.
    pub forward: Vector3f,
    /// Bank all vehicles into their turns, whatever their own flag says.
    pub banking: bool,
    pub frames_per_second: Float,
    pub window: FrameWindow,
    /// Vertical bob amplitude of the generated routes.
    pub bob_amplitude: Float,
    /// Vertical bob frequency of the generated routes, in cycles per second.
    pub bob_frequency: Float
}

impl SceneOptions {
    pub const MAX_TAU: Float = 10.0;

    /// Reject configurations evaluation cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.tau >= 0.0 && self.tau <= SceneOptions::MAX_TAU) {
            return Err(CityError::InvalidConfig(format!(
                "tau must be within [0, {}], got {}", SceneOptions::MAX_TAU, self.tau)));
        }
        if !self.handle_gain.is_finite() {
            return Err(CityError::InvalidConfig(format!("handle gain must be finite, got {}", self.handle_gain)));
        }
        if (self.forward.length() - 1.0).abs() > 1e-3 {
            return Err(CityError::InvalidConfig(format!(
                "forward vector must have unit length, got ({}, {}, {})",
                self.forward.x, self.forward.y, self.forward.z)));
        }
        if !(self.frames_per_second > 0.0) || !self.frames_per_second.is_finite() {
            return Err(CityError::InvalidConfig(format!(
                "frames per second must be positive, got {}", self.frames_per_second)));
        }
        if !self.window.start.is_finite() || !self.window.end.is_finite() || self.window.end <= self.window.start {
            return Err(CityError::InvalidConfig(format!(
                "frame window [{}, {}] is empty", self.window.start, self.window.end)));
        }
        if !self.bob_amplitude.is_finite() || !self.bob_frequency.is_finite() || self.bob_frequency < 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "invalid vertical bob amplitude {} / frequency {}", self.bob_amplitude, self.bob_frequency)));
        }
        Ok(())
    }

    /// Interpolation settings handed to the curves.
    pub fn interpolation(&self) -> Interpolation {
        Interpolation {
            mode: self.interpolation,
            tau: self.tau,
            handle_gain: self.handle_gain
        }
    }

    /// Seconds between two frames.
    pub fn frame_duration(&self) -> Float {
        1.0 / self.frames_per_second
    }

    /// True when routes carry a vertical bob.
    pub fn has_vertical_bob(&self) -> bool {
        self.bob_amplitude != 0.0 && self.bob_frequency != 0.0
    }
}

impl Default for SceneOptions {
    fn default() -> SceneOptions {
        SceneOptions {
            interpolation: InterpolationMode::Linear,
            tau: Interpolation::DEFAULT_TAU,
            handle_gain: Interpolation::DEFAULT_HANDLE_GAIN,
            forward: Vector3f::Y,
            banking: false,
            frames_per_second: 24.0,
            window: FrameWindow::default(),
            bob_amplitude: 2.0,
            bob_frequency: 1.0
        }
    }
}
