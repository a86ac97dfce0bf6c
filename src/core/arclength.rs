//! Arclength reparametrization.
//!
//! The distance curve records how far a trajectory has travelled at each whole
//! frame of the window, the desired distance curve is a straight ramp from no
//! distance to the full length. Mapping a frame through both gives the raw time
//! at which the vehicle should be to move at constant speed.
use super::common::{Float, partition_point};
use super::curve::{Curve, Interpolation, Sample};
use super::error::{CityError, Result};
use super::interpolation::lerp;
use super::options::FrameWindow;
use super::trajectory::Trajectory;

/// Cumulative distance travelled along `trajectory`, sampled at every whole
/// frame of `window`. Always interpolated linearly.
pub fn build_distance_curve(
    trajectory: &Trajectory,
    window: &FrameWindow,
    interpolation: &Interpolation
) -> Result<Curve> {
    let frames = window.frame_count();
    let mut samples = Vec::with_capacity(frames);
    samples.push(Sample::new(window.start, 0.0));
    let mut travelled = 0.0;
    let mut previous = trajectory.evaluate(window.start, interpolation);
    for k in 1..frames {
        let t = window.start + k as Float;
        let current = trajectory.evaluate(t, interpolation);
        travelled += current.distance(&previous);
        samples.push(Sample::new(t, travelled));
        previous = current;
    }
    vlog!(2, "distance curve over [{}, {}]: {} samples, length {}", window.start, window.end, samples.len(), travelled);
    Ok(Curve::new(samples)?.force_linear())
}

/// Straight ramp between the distance at the start and at the end of `window`.
pub fn build_desired_distance_curve(distance: &Curve, window: &FrameWindow) -> Result<Curve> {
    if !(window.end > window.start) {
        return Err(CityError::InvalidConfig(format!(
            "frame window [{}, {}] is empty", window.start, window.end)));
    }
    let samples = vec![
        Sample::new(window.start, distance.value_at(window.start)),
        Sample::new(window.end, distance.value_at(window.end)),
    ];
    Ok(Curve::new(samples)?.force_linear())
}

/// Raw trajectory time at which the distance travelled equals the desired
/// distance at frame `t`.
pub fn effective_time(distance: &Curve, desired: &Curve, t: Float) -> Float {
    let d = desired.value_at(t);
    let samples = distance.samples();
    let i = partition_point(samples.len(), |k| samples[k].value < d);
    if i == 0 {
        return distance.start_time();
    }
    if i >= samples.len() {
        return distance.end_time();
    }
    let a = &samples[i - 1];
    let b = &samples[i];
    lerp(a.value, b.value, a.time, b.time, d)
}
