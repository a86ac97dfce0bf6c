//! The scene is what a host talks to: it holds the configuration, the
//! buildings and the vehicles, and answers position and orientation queries by
//! vehicle id.
use rayon::prelude::*;
use crate::core::common::Float;
use crate::core::curve::Curve;
use crate::core::error::{CityError, Result};
use crate::core::options::SceneOptions;
use crate::core::progress_reporter::ProgressReporter;
use crate::core::rng::Rng;
use crate::core::vehicle::Vehicle;
use super::CityOptions;
use super::grid::{Building, generate_buildings};
use super::routes::{generate_route, start_position};

/// Handle to a vehicle of a scene.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

#[derive(Debug)]
pub struct Scene {
    options: SceneOptions,
    buildings: Vec<Building>,
    vehicles: Vec<Vehicle>
}

impl Scene {
    pub fn new(options: SceneOptions) -> Result<Scene> {
        options.validate()?;
        Ok(Scene {
            options,
            buildings: Vec::new(),
            vehicles: Vec::new()
        })
    }

    /// Lay out a city and its traffic, then build every vehicle's distance curves.
    pub fn generate(city: &CityOptions, options: SceneOptions, progress: Option<&ProgressReporter>) -> Result<Scene> {
        city.validate()?;
        let mut scene = Scene::new(options)?;
        let mut rng = Rng::new(city.seed);
        scene.buildings = generate_buildings(city, &mut rng);
        for i in 0..city.vehicle_count {
            let start = start_position(city, &mut rng);
            let route = generate_route(city, &scene.options, start, &mut rng)?;
            scene.add_vehicle(Vehicle::new(format!("vehicle.{:03}", i), route));
        }
        info!("generated {} vehicles over frames [{}, {}]",
            scene.vehicles.len(), scene.options.window.start, scene.options.window.end);
        scene.rebuild_all(progress)?;
        Ok(scene)
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Replace the configuration between animation runs. Memoised orientations
    /// are dropped; distance curves are kept until rebuilt.
    pub fn set_options(&mut self, options: SceneOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        for v in &self.vehicles {
            v.invalidate();
        }
        Ok(())
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> VehicleId {
        self.vehicles.push(vehicle);
        VehicleId(self.vehicles.len() - 1)
    }

    pub fn vehicle(&self, id: VehicleId) -> Result<&Vehicle> {
        self.vehicles.get(id.0).ok_or(CityError::UnknownVehicle(id.0))
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle> {
        self.vehicles.get_mut(id.0).ok_or(CityError::UnknownVehicle(id.0))
    }

    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleId> {
        (0..self.vehicles.len()).map(VehicleId)
    }

    /// Look a vehicle up by name.
    pub fn find(&self, name: &str) -> Option<VehicleId> {
        self.vehicles.iter().position(|v| v.name == name).map(VehicleId)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Coordinate `axis` (0 = x, 1 = y, 2 = z) of vehicle `id` at `frame`.
    pub fn position(&self, id: VehicleId, frame: Float, axis: usize) -> Result<Float> {
        self.vehicle(id)?.position(&self.options, frame, axis)
    }

    /// Rotation component `axis` (0 = w, 1 = x, 2 = y, 3 = z) of vehicle `id` at `frame`.
    pub fn orientation(&self, id: VehicleId, frame: Float, axis: usize) -> Result<Float> {
        self.vehicle(id)?.orientation(&self.options, frame, axis)
    }

    pub fn rebuild_distance_curve(&mut self, id: VehicleId) -> Result<()> {
        let options = &self.options;
        let vehicle = self.vehicles.get_mut(id.0).ok_or(CityError::UnknownVehicle(id.0))?;
        vehicle.rebuild_distance_curve(options)
    }

    pub fn rebuild_desired_distance_curve(&mut self, id: VehicleId) -> Result<()> {
        let options = &self.options;
        let vehicle = self.vehicles.get_mut(id.0).ok_or(CityError::UnknownVehicle(id.0))?;
        vehicle.rebuild_desired_distance_curve(options)
    }

    /// Drive vehicle `id` along a user authored desired distance profile.
    pub fn set_desired_distance_curve(&mut self, id: VehicleId, curve: Curve) -> Result<()> {
        self.vehicle_mut(id)?.set_desired_distance_curve(curve)
    }

    /// Rebuild the distance curves of every vehicle in parallel.
    pub fn rebuild_all(&mut self, progress: Option<&ProgressReporter>) -> Result<()> {
        let options = &self.options;
        self.vehicles.par_iter_mut().try_for_each(|vehicle| {
            vehicle.rebuild(options)?;
            if let Some(progress) = progress {
                progress.update(1);
            }
            Ok(())
        })
    }
}
