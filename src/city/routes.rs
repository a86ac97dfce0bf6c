//! Route keyframes for the generated traffic. Vehicles start on a random street
//! at a random flying height and either cross the city in a straight line or
//! zig-zag through it, alternating legs along y and x.
use crate::core::common::Float;
use crate::core::curve::{Curve, Sample};
use crate::core::error::Result;
use crate::core::geometry::Point3f;
use crate::core::options::SceneOptions;
use crate::core::rng::Rng;
use crate::core::trajectory::Trajectory;
use super::CityOptions;

/// How far past the city a straight crossing carries on, as a share of its width.
pub const CROSSING_OVERSHOOT: Float = 1.25;

/// Size of the generated vehicle models relative to the street width.
pub fn vehicle_size(options: &CityOptions) -> Float {
    options.street_width * 0.4 / 2.0
}

/// Extent of the city along x, from the first street to the far edge.
pub fn city_span_x(options: &CityOptions) -> (Float, Float) {
    let begin = options.origin.x - options.street_width / 2.0;
    let end = options.origin.x + (options.streets_x + 1) as Float * options.pitch();
    (begin, end)
}

/// Random starting point on a street, possibly a little outside the city.
pub fn start_position(options: &CityOptions, rng: &mut Rng) -> Point3f {
    let nx = options.streets_x as i64;
    let ny = options.streets_y as i64;
    let street_y = rng.uniform_int_inclusive((-ny).div_euclid(4), ny + ny.div_euclid(2)) as Float;
    let height = rng.uniform_range(vehicle_size(options) / 2.0, options.max_height);
    let street_x = rng.uniform_int_inclusive((-nx).div_euclid(4), nx + nx.div_euclid(4)) as Float;
    let w = options.street_width;
    let l = options.block_size;
    Point3f::new(
        options.origin.x + (street_x - 1.0) * options.pitch() + (w / 2.0 + l),
        options.origin.y + (street_y - 0.5) * w + l * street_y,
        options.origin.z + height
    )
}

/// Keyframes for the horizontal part of a route.
#[derive(Debug, Clone, Default)]
struct Legs {
    x: Vec<Sample>,
    y: Vec<Sample>,
    frame: Float
}

impl Legs {
    fn key_x(&mut self, value: Float) {
        self.x.push(Sample::new(self.frame, value));
    }

    fn key_xy(&mut self, p: &Point3f) {
        self.x.push(Sample::new(self.frame, p.x));
        self.y.push(Sample::new(self.frame, p.y));
    }
}

/// Build the trajectory of one vehicle starting at `start`.
pub fn generate_route(
    city: &CityOptions,
    scene: &SceneOptions,
    start: Point3f,
    rng: &mut Rng
) -> Result<Trajectory> {
    let fps = scene.frames_per_second;
    let speed = city.vehicle_speed;
    let pitch = city.pitch();
    let (begin, end) = city_span_x(city);

    let mut legs = Legs {
        frame: scene.window.start,
        ..Legs::default()
    };
    let mut p = start;
    legs.key_xy(&p);

    if city.turns == 0 {
        let crossing = (end - begin) * CROSSING_OVERSHOOT;
        let direction = if p.x > end {
            -1.0
        } else if p.x < begin {
            1.0
        } else if rng.coin() {
            1.0
        } else {
            -1.0
        };
        p.x += direction * crossing;
        legs.frame += city.streets_x as Float * CROSSING_OVERSHOOT / speed * fps;
        legs.key_x(p.x);
    } else {
        // Fly into the city before turning.
        if p.x < begin || p.x > end {
            let edge = if p.x < begin { begin } else { end };
            let streets = (edge - p.x).abs() / pitch;
            p.x = edge;
            legs.frame += streets / speed * fps;
            legs.key_xy(&p);
        }
        for turn in 0..=city.turns {
            let sign = if rng.coin() { 1.0 } else { -1.0 };
            let streets = if turn % 2 == 1 {
                let n = rng.uniform_int_inclusive(1, city.streets_x as i64) as Float;
                p.x += sign * n * pitch;
                n
            } else {
                let n = rng.uniform_int_inclusive(1, city.streets_y as i64) as Float;
                p.y += sign * n * pitch;
                n
            };
            legs.frame += streets / speed * fps;
            legs.key_xy(&p);
        }
    }

    let z = bob_keys(scene, start.z, scene.window.start, legs.frame);
    vlog!(2, "route from ({}, {}, {}) ends at frame {} with {} x keys", start.x, start.y, start.z, legs.frame, legs.x.len());
    Ok(Trajectory::new(Curve::new(legs.x)?, Curve::new(legs.y)?, Curve::new(z)?))
}

/// Height keys: a crest every `fps / frequency` frames with the base height half
/// way between, or a flat line when there is no bob.
pub fn bob_keys(scene: &SceneOptions, base: Float, first: Float, last: Float) -> Vec<Sample> {
    let step = if scene.bob_frequency != 0.0 {
        (scene.frames_per_second / scene.bob_frequency) as i64
    } else {
        0
    };
    let first_frame = first as i64;
    let last_frame = last as i64;
    let mut keys: Vec<Sample> = Vec::new();
    if step > 0 {
        let crest = base + scene.bob_amplitude;
        let mut f = first_frame;
        while f < last_frame {
            keys.push(Sample::new(f as Float, crest));
            f += step;
        }
        let mut f = first_frame + step / 2;
        while f < last_frame {
            keys.push(Sample::new(f as Float, base));
            f += step;
        }
        // Troughs replace crests keyed on the same frame.
        keys.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        let mut merged: Vec<Sample> = Vec::with_capacity(keys.len());
        for key in keys {
            match merged.last_mut() {
                Some(prev) if prev.time == key.time => *prev = key,
                _ => merged.push(key),
            }
        }
        keys = merged;
    }
    if keys.is_empty() {
        keys.push(Sample::new(first, base));
        if last > first {
            keys.push(Sample::new(last, base));
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::curve::Interpolation;
    use crate::core::options::FrameWindow;
    use approx::assert_abs_diff_eq;

    fn scene() -> SceneOptions {
        SceneOptions {
            window: FrameWindow::new(1.0, 250.0),
            ..SceneOptions::default()
        }
    }

    #[test]
    fn starts_lie_on_streets() {
        let city = CityOptions::default();
        let mut rng = Rng::new(5);
        for _ in 0..100 {
            let p = start_position(&city, &mut rng);
            assert!(p.z >= vehicle_size(&city) / 2.0 && p.z <= city.max_height);
            // x sits between two blocks: offset from the first street is a whole pitch.
            let offset = (p.x - (city.street_width / 2.0 + city.block_size)) / city.pitch();
            assert_abs_diff_eq!(offset, offset.round(), epsilon = 1e-4);
        }
    }

    #[test]
    fn bob_alternates_crest_and_base() {
        let keys = bob_keys(&scene(), 10.0, 1.0, 60.0);
        let times: Vec<Float> = keys.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 13.0, 25.0, 37.0, 49.0]);
        assert_eq!(keys[0].value, 12.0);
        assert_eq!(keys[1].value, 10.0);
        assert_eq!(keys[2].value, 12.0);
    }

    #[test]
    fn flat_route_without_frequency() {
        let options = SceneOptions {
            bob_frequency: 0.0,
            ..scene()
        };
        let keys = bob_keys(&options, 10.0, 1.0, 60.0);
        assert_eq!(keys, vec![Sample::new(1.0, 10.0), Sample::new(60.0, 10.0)]);
        assert_eq!(bob_keys(&options, 10.0, 1.0, 1.0).len(), 1);
    }

    #[test]
    fn straight_crossing_passes_the_city() {
        let city = CityOptions {
            turns: 0,
            ..CityOptions::default()
        };
        let scene = scene();
        let (begin, end) = city_span_x(&city);
        let start = Point3f::new(begin - 10.0, 20.0, 15.0);
        let route = generate_route(&city, &scene, start, &mut Rng::new(1)).unwrap();
        assert_eq!(route.x.len(), 2);
        assert_abs_diff_eq!(route.x.last().value, start.x + (end - begin) * CROSSING_OVERSHOOT, epsilon = 1e-3);
        assert_abs_diff_eq!(route.x.end_time(), 1.0 + 40.0 * 1.25 / 1.6 * 24.0, epsilon = 1e-3);
        assert_eq!(route.y.len(), 1);
    }

    #[test]
    fn turning_route_alternates_axes() {
        let city = CityOptions {
            turns: 4,
            ..CityOptions::default()
        };
        let scene = scene();
        let start = start_position(&city, &mut Rng::new(9));
        let route = generate_route(&city, &scene, start, &mut Rng::new(9)).unwrap();
        let xs = route.x.samples();
        let ys = route.y.samples();
        assert_eq!(xs.len(), ys.len());
        // Each leg after entering the city moves along exactly one axis.
        let legs = xs.len() - 5;
        for k in legs..xs.len() {
            let dx = xs[k].value - xs[k - 1].value;
            let dy = ys[k].value - ys[k - 1].value;
            let turn = k - legs;
            if turn % 2 == 1 {
                assert_eq!(dy, 0.0);
                assert!(dx.abs() >= city.pitch() - 1e-3);
            } else {
                assert_eq!(dx, 0.0);
                assert!(dy.abs() >= city.pitch() - 1e-3);
            }
        }
        let p = route.evaluate(scene.window.start, &Interpolation::linear());
        assert_abs_diff_eq!(p.x, start.x, epsilon = 1e-4);
        assert_abs_diff_eq!(p.z, start.z + scene.bob_amplitude, epsilon = 1e-4);
    }
}
