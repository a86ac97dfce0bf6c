//! Building placement. Buildings thin out and get lower away from the centre
//! of the grid.
use crate::core::common::Float;
use crate::core::geometry::Point3f;
use crate::core::rng::Rng;
use super::CityOptions;

/// Probability above which a building is drawn from the taller half of the height range.
pub const DOWNTOWN_PROBABILITY: Float = 0.94;

/// An axis aligned box standing on a city block.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Building {
    /// Centre of the box, sunk one unit into the ground.
    pub center: Point3f,
    /// Side of the square footprint.
    pub footprint: Float,
    pub height: Float
}

/// Chance of a building at planar offset `(dx, dy)` from the centre of the grid.
pub fn building_probability(dx: Float, dy: Float) -> Float {
    let d = (dx * dx + dy * dy).sqrt();
    (-0.4 * (d - 12.0)).tanh() * 0.45 + 0.5
}

/// Planar centre of the block grid.
pub fn grid_center(options: &CityOptions) -> (Float, Float) {
    let nx = options.streets_x as Float;
    let ny = options.streets_y as Float;
    let l = options.block_size;
    let w = options.street_width;
    (
        options.origin.x + ((nx + 1.0) * l + nx * w) / 2.0,
        options.origin.y + ((ny + 1.0) * l + ny * w) / 2.0
    )
}

/// Centre of block `(row, col)` on the ground.
pub fn block_center(options: &CityOptions, row: u32, col: u32) -> Point3f {
    let half = options.block_size / 2.0;
    Point3f::new(
        options.origin.x + half + row as Float * options.pitch(),
        options.origin.y + half + col as Float * options.pitch(),
        options.origin.z
    )
}

/// Fill the `(streets_x + 1) x (streets_y + 1)` blocks of the grid.
pub fn generate_buildings(options: &CityOptions, rng: &mut Rng) -> Vec<Building> {
    let (cx, cy) = grid_center(options);
    let mid_height = (options.min_height + options.max_height) / 2.0;
    let mut buildings = Vec::new();
    for row in 0..=options.streets_x {
        for col in 0..=options.streets_y {
            let base = block_center(options, row, col);
            let p = building_probability(base.x - cx, base.y - cy);
            if rng.uniform_range(options.min_variability, options.max_variability) >= p {
                continue;
            }
            let height = if p > DOWNTOWN_PROBABILITY {
                rng.uniform_range(mid_height, options.max_height)
            } else {
                rng.uniform_range(options.min_height, mid_height)
            };
            buildings.push(Building {
                center: Point3f::new(base.x, base.y, options.origin.z + height - 1.0),
                footprint: options.block_size,
                height
            });
        }
    }
    info!("placed {} buildings on {} blocks", buildings.len(),
        (options.streets_x + 1) * (options.streets_y + 1));
    buildings
}
