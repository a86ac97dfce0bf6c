//! A vehicle owns its trajectory and the curves derived from it, and answers
//! the per-frame position and orientation queries of the host.
use hashbrown::HashMap;
use parking_lot::Mutex;
use super::arclength::{build_distance_curve, build_desired_distance_curve, effective_time};
use super::common::{Float, frame_key};
use super::curve::Curve;
use super::error::{CityError, Result};
use super::geometry::Point3f;
use super::options::SceneOptions;
use super::orientation::Orienter;
use super::quaternion::Quaternion;
use super::trajectory::Trajectory;

#[derive(Debug)]
pub struct Vehicle {
    pub name: String,
    trajectory: Trajectory,
    distance: Option<Curve>,
    desired: Option<Curve>,
    reparametrize: bool,
    banking: bool,
    rotations: Mutex<RotationCache>
}

/// Rotations memoised per frame, valid for the options they were computed with.
#[derive(Debug, Default)]
struct RotationCache {
    options: Option<SceneOptions>,
    rotations: HashMap<u64, Quaternion>
}

impl RotationCache {
    /// Drop every rotation computed under other options.
    fn sync(&mut self, options: &SceneOptions) {
        if self.options.as_ref() != Some(options) {
            self.rotations.clear();
            self.options = Some(options.clone());
        }
    }

    fn get(&self, frame: Float) -> Option<Quaternion> {
        self.rotations.get(&frame_key(frame)).cloned()
    }
}

impl Vehicle {
    pub fn new<S: Into<String>>(name: S, trajectory: Trajectory) -> Vehicle {
        Vehicle {
            name: name.into(),
            trajectory,
            distance: None,
            desired: None,
            reparametrize: false,
            banking: false,
            rotations: Mutex::new(RotationCache::default())
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Replace the keyframes. Derived distance curves no longer apply and are dropped.
    pub fn set_trajectory(&mut self, trajectory: Trajectory) {
        self.trajectory = trajectory;
        self.distance = None;
        self.desired = None;
        self.invalidate();
    }

    pub fn reparametrize(&self) -> bool {
        self.reparametrize
    }

    /// Move at constant speed along the path instead of following the raw key timing.
    pub fn set_reparametrize(&mut self, reparametrize: bool) {
        if self.reparametrize != reparametrize {
            self.reparametrize = reparametrize;
            self.invalidate();
        }
    }

    pub fn banking(&self) -> bool {
        self.banking
    }

    pub fn set_banking(&mut self, banking: bool) {
        if self.banking != banking {
            self.banking = banking;
            self.invalidate();
        }
    }

    pub fn distance_curve(&self) -> Option<&Curve> {
        self.distance.as_ref()
    }

    pub fn desired_distance_curve(&self) -> Option<&Curve> {
        self.desired.as_ref()
    }

    /// Forget memoised orientations.
    pub fn invalidate(&self) {
        self.rotations.lock().rotations.clear();
    }

    /// Recompute the distance travelled curve over the frame window.
    pub fn rebuild_distance_curve(&mut self, options: &SceneOptions) -> Result<()> {
        let curve = build_distance_curve(&self.trajectory, &options.window, &options.interpolation())?;
        debug!("{}: distance curve rebuilt, total {}", self.name, curve.last().value);
        self.distance = Some(curve);
        self.invalidate();
        Ok(())
    }

    /// Recompute the desired distance ramp, building the distance curve first
    /// when it does not exist yet.
    pub fn rebuild_desired_distance_curve(&mut self, options: &SceneOptions) -> Result<()> {
        if self.distance.is_none() {
            info!("{}: no distance curve yet, building it first", self.name);
            self.rebuild_distance_curve(options)?;
        }
        let curve = match self.distance {
            Some(ref distance) => build_desired_distance_curve(distance, &options.window)?,
            None => return Err(CityError::MissingCurveData(self.name.clone())),
        };
        self.desired = Some(curve);
        self.invalidate();
        Ok(())
    }

    /// Replace the desired distance profile with a user authored one, such as
    /// an ease-in. The profile is always interpolated linearly and stays in
    /// place until the next desired curve rebuild.
    pub fn set_desired_distance_curve(&mut self, curve: Curve) -> Result<()> {
        if curve.samples().is_empty() {
            return Err(CityError::MalformedCurve(format!(
                "{}: desired distance curve needs at least one sample", self.name)));
        }
        self.desired = Some(curve.force_linear());
        self.invalidate();
        Ok(())
    }

    /// Rebuild both distance curves.
    pub fn rebuild(&mut self, options: &SceneOptions) -> Result<()> {
        self.rebuild_distance_curve(options)?;
        self.rebuild_desired_distance_curve(options)
    }

    /// Trajectory time sampled at `frame`, after clamping the frame into the
    /// window and reparametrizing when enabled.
    pub fn try_effective_time(&self, options: &SceneOptions, frame: Float) -> Result<Float> {
        let frame = options.window.clamp(frame);
        if !self.reparametrize {
            return Ok(frame);
        }
        match (&self.distance, &self.desired) {
            (Some(distance), Some(desired)) => Ok(effective_time(distance, desired, frame)),
            _ => Err(CityError::MissingCurveData(format!(
                "{} has no distance curves to reparametrize with", self.name))),
        }
    }

    /// Like `try_effective_time`, falling back to the raw frame when the
    /// distance curves have not been built.
    pub fn effective_time(&self, options: &SceneOptions, frame: Float) -> Float {
        match self.try_effective_time(options, frame) {
            Ok(t) => t,
            Err(e) => {
                warn!("{}, using raw timing", e);
                options.window.clamp(frame)
            }
        }
    }

    /// World position at `frame`.
    pub fn location(&self, options: &SceneOptions, frame: Float) -> Point3f {
        let t = self.effective_time(options, frame);
        self.trajectory.evaluate(t, &options.interpolation())
    }

    /// One coordinate of the position at `frame` (0 = x, 1 = y, 2 = z).
    pub fn position(&self, options: &SceneOptions, frame: Float, axis: usize) -> Result<Float> {
        if axis > 2 {
            return Err(CityError::InvalidAxis { index: axis, limit: 3 });
        }
        Ok(self.location(options, frame)[axis])
    }

    /// Rotation at `frame`. Frames where the vehicle stands still keep the
    /// rotation of the last frame it moved in, or the identity if it never did.
    pub fn rotation(&self, options: &SceneOptions, frame: Float) -> Quaternion {
        let frame = options.window.clamp(frame);
        {
            let mut cache = self.rotations.lock();
            cache.sync(options);
            if let Some(q) = cache.get(frame) {
                return q;
            }
        }
        let orienter = Orienter::new(options, self.banking);
        let position = |t: Float| self.location(options, t);
        let mut q = Quaternion::identity();
        let mut f = frame;
        while f >= options.window.start {
            if let Some(found) = self.rotations.lock().get(f) {
                q = found;
                break;
            }
            if let Some(found) = orienter.orient(&position, f) {
                q = found;
                break;
            }
            vlog!(2, "{}: no travel direction at frame {}", self.name, f);
            f -= 1.0;
        }
        self.rotations.lock().rotations.insert(frame_key(frame), q);
        q
    }

    /// One component of the rotation at `frame` (0 = w, 1 = x, 2 = y, 3 = z).
    pub fn orientation(&self, options: &SceneOptions, frame: Float, axis: usize) -> Result<Float> {
        self.rotation(options, frame)
            .component(axis)
            .ok_or(CityError::InvalidAxis { index: axis, limit: Quaternion::COMPONENTS })
    }
}
