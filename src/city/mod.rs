//! Procedural city generation: a grid of buildings and vehicles flying
//! keyframed routes along its streets.
use crate::core::common::Float;
use crate::core::error::{CityError, Result};
use crate::core::geometry::Point3f;

pub mod grid;
pub mod routes;
pub mod scene;

#[cfg(test)]
mod tests;

pub use grid::Building;
pub use scene::{Scene, VehicleId};

/// Layout of the generated city and its traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct CityOptions {
    /// Number of streets along x.
    pub streets_x: u32,
    /// Number of streets along y.
    pub streets_y: u32,
    /// Side of a square city block.
    pub block_size: Float,
    pub street_width: Float,
    pub min_height: Float,
    pub max_height: Float,
    /// Lower bound of the random draw compared against the building probability.
    pub min_variability: Float,
    /// Upper bound of the random draw compared against the building probability.
    pub max_variability: Float,
    pub vehicle_count: u32,
    /// Streets per second.
    pub vehicle_speed: Float,
    /// Number of turns in each route; 0 gives straight crossings.
    pub turns: u32,
    /// Corner of the grid.
    pub origin: Point3f,
    pub seed: u64
}

impl CityOptions {
    pub fn validate(&self) -> Result<()> {
        if self.block_size <= 0.0 || self.street_width <= 0.0 {
            return Err(CityError::InvalidConfig(format!(
                "block size {} and street width {} must be positive", self.block_size, self.street_width)));
        }
        if !(self.min_height > 0.0) || self.max_height < self.min_height {
            return Err(CityError::InvalidConfig(format!(
                "building heights [{}, {}] are not a valid range", self.min_height, self.max_height)));
        }
        if self.max_variability < self.min_variability {
            return Err(CityError::InvalidConfig(format!(
                "building variability [{}, {}] is not a valid range", self.min_variability, self.max_variability)));
        }
        if !(self.vehicle_speed > 0.0) {
            return Err(CityError::InvalidConfig(format!("vehicle speed must be positive, got {}", self.vehicle_speed)));
        }
        if self.streets_x == 0 || self.streets_y == 0 {
            return Err(CityError::InvalidConfig("the city needs at least one street along each axis".to_string()));
        }
        Ok(())
    }

    /// Distance between the centres of two neighbouring blocks.
    pub fn pitch(&self) -> Float {
        self.block_size + self.street_width
    }
}

impl Default for CityOptions {
    fn default() -> CityOptions {
        CityOptions {
            streets_x: 40,
            streets_y: 40,
            block_size: 4.0,
            street_width: 4.0,
            min_height: 2.0,
            max_height: 40.0,
            min_variability: 0.0,
            max_variability: 0.2,
            vehicle_count: 400,
            vehicle_speed: 1.6,
            turns: 20,
            origin: Point3f::zero(),
            seed: 0
        }
    }
}
