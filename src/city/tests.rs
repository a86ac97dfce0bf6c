use approx::assert_abs_diff_eq;
use crate::core::common::Float;
use crate::core::curve::{Curve, InterpolationMode};
use crate::core::error::CityError;
use crate::core::geometry::{Point3f, Vector3f};
use crate::core::options::{FrameWindow, SceneOptions};
use crate::core::quaternion::Quaternion;
use crate::core::trajectory::Trajectory;
use crate::core::vehicle::Vehicle;
use super::{CityOptions, Scene, VehicleId};

fn small_city() -> CityOptions {
    CityOptions {
        streets_x: 6,
        streets_y: 6,
        vehicle_count: 12,
        turns: 3,
        seed: 17,
        ..CityOptions::default()
    }
}

fn scene_options(mode: InterpolationMode) -> SceneOptions {
    SceneOptions {
        interpolation: mode,
        window: FrameWindow::new(1.0, 120.0),
        ..SceneOptions::default()
    }
}

fn rotation(scene: &Scene, id: VehicleId, frame: Float) -> Quaternion {
    let c = |axis| scene.orientation(id, frame, axis).unwrap();
    Quaternion::new(c(1), c(2), c(3), c(0))
}

#[test]
fn straight_flight_through_the_host_interface() {
    let options = SceneOptions {
        window: FrameWindow::new(0.0, 24.0),
        ..SceneOptions::default()
    };
    let mut scene = Scene::new(options).unwrap();
    let id = scene.add_vehicle(Vehicle::new("courier", Trajectory::from_keyframes(&[
        (0.0, Point3f::new(0.0, 0.0, 0.0)),
        (24.0, Point3f::new(10.0, 0.0, 0.0)),
    ]).unwrap()));
    assert_abs_diff_eq!(scene.position(id, 12.0, 0).unwrap(), 5.0, epsilon = 1e-6);
    assert_eq!(scene.position(id, 12.0, 1).unwrap(), 0.0);
    let facing = rotation(&scene, id, 12.0).rotate(&Vector3f::Y);
    assert_abs_diff_eq!(facing.x, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(facing.y, 0.0, epsilon = 1e-5);
    assert_eq!(scene.find("courier"), Some(id));
}

#[test]
fn unknown_vehicles_and_axes_are_errors() {
    let mut scene = Scene::new(scene_options(InterpolationMode::Linear)).unwrap();
    assert_eq!(scene.position(VehicleId(0), 1.0, 0), Err(CityError::UnknownVehicle(0)));
    assert_eq!(scene.rebuild_distance_curve(VehicleId(3)), Err(CityError::UnknownVehicle(3)));
    let id = scene.add_vehicle(Vehicle::new("v", Trajectory::from_keyframes(&[
        (1.0, Point3f::zero()),
        (10.0, Point3f::new(1.0, 1.0, 1.0)),
    ]).unwrap()));
    assert!(matches!(scene.orientation(id, 2.0, 7), Err(CityError::InvalidAxis { index: 7, .. })));
}

#[test]
fn invalid_configuration_is_refused() {
    let mut options = scene_options(InterpolationMode::CatmullRom);
    options.tau = 11.0;
    assert!(matches!(Scene::new(options.clone()), Err(CityError::InvalidConfig(_))));

    let mut scene = Scene::new(scene_options(InterpolationMode::Linear)).unwrap();
    assert!(scene.set_options(options).is_err());
    assert_eq!(scene.options().interpolation, InterpolationMode::Linear);

    let city = CityOptions {
        vehicle_speed: 0.0,
        ..small_city()
    };
    assert!(Scene::generate(&city, scene_options(InterpolationMode::Linear), None).is_err());
}

#[test]
fn generation_is_reproducible() {
    let a = Scene::generate(&small_city(), scene_options(InterpolationMode::Hermite), None).unwrap();
    let b = Scene::generate(&small_city(), scene_options(InterpolationMode::Hermite), None).unwrap();
    assert_eq!(a.len(), 12);
    assert_eq!(a.buildings(), b.buildings());
    for id in a.vehicle_ids() {
        assert_eq!(a.vehicle(id).unwrap().trajectory(), b.vehicle(id).unwrap().trajectory());
        assert!(a.vehicle(id).unwrap().distance_curve().is_some());
        assert!(a.vehicle(id).unwrap().desired_distance_curve().is_some());
    }
}

#[test]
fn generated_traffic_is_well_behaved() {
    for &mode in &[InterpolationMode::Linear, InterpolationMode::Hermite, InterpolationMode::CatmullRom] {
        let mut options = scene_options(mode);
        options.banking = true;
        let scene = Scene::generate(&small_city(), options, None).unwrap();
        for id in scene.vehicle_ids() {
            let vehicle = scene.vehicle(id).unwrap();
            assert!(vehicle.distance_curve().unwrap().is_non_decreasing());
            for f in (1..=120).step_by(7) {
                let q = rotation(&scene, id, f as Float);
                assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-3);
            }
        }
    }
}

#[test]
fn reparametrized_traffic_keeps_its_endpoints() {
    let mut scene = Scene::generate(&small_city(), scene_options(InterpolationMode::CatmullRom), None).unwrap();
    let window = scene.options().window;
    let ids: Vec<VehicleId> = scene.vehicle_ids().collect();
    for id in ids {
        let start: Vec<Float> = (0..3).map(|axis| scene.position(id, window.start, axis).unwrap()).collect();
        let end: Vec<Float> = (0..3).map(|axis| scene.position(id, window.end, axis).unwrap()).collect();
        scene.vehicle_mut(id).unwrap().set_reparametrize(true);
        for axis in 0..3 {
            assert_eq!(scene.position(id, window.start, axis).unwrap(), start[axis]);
            assert_eq!(scene.position(id, window.end, axis).unwrap(), end[axis]);
        }
    }
}

#[test]
fn changing_options_drops_memoised_rotations() {
    let mut scene = Scene::new(scene_options(InterpolationMode::Linear)).unwrap();
    let id = scene.add_vehicle(Vehicle::new("corner", Trajectory::from_keyframes(&[
        (1.0, Point3f::new(0.0, 0.0, 10.0)),
        (20.0, Point3f::new(0.0, 19.0, 10.0)),
        (40.0, Point3f::new(20.0, 19.0, 10.0)),
    ]).unwrap()));
    let flat = rotation(&scene, id, 21.0);
    let mut options = scene.options().clone();
    options.banking = true;
    scene.set_options(options).unwrap();
    let banked = rotation(&scene, id, 21.0);
    assert!(!flat.same_rotation(&banked, 1e-4));
}

#[test]
fn single_rebuilds_follow_the_host_order() {
    let mut scene = Scene::new(scene_options(InterpolationMode::Linear)).unwrap();
    let id = scene.add_vehicle(Vehicle::new("v", Trajectory::from_keyframes(&[
        (1.0, Point3f::zero()),
        (60.0, Point3f::new(30.0, 0.0, 0.0)),
    ]).unwrap()));
    scene.rebuild_distance_curve(id).unwrap();
    assert!(scene.vehicle(id).unwrap().desired_distance_curve().is_none());
    scene.rebuild_desired_distance_curve(id).unwrap();
    let desired = scene.vehicle(id).unwrap().desired_distance_curve().unwrap();
    assert_abs_diff_eq!(desired.last().value, 30.0, epsilon = 1e-3);
}

#[test]
fn authored_profile_through_the_host_interface() {
    let mut scene = Scene::new(scene_options(InterpolationMode::Linear)).unwrap();
    let id = scene.add_vehicle(Vehicle::new("v", Trajectory::from_keyframes(&[
        (1.0, Point3f::zero()),
        (121.0, Point3f::new(30.0, 0.0, 0.0)),
    ]).unwrap()));
    scene.rebuild_all(None).unwrap();
    scene.vehicle_mut(id).unwrap().set_reparametrize(true);
    // Hold still for the first half of the window, then cover the whole route.
    let profile = Curve::from_points(&[(1.0, 0.0), (60.0, 0.0), (120.0, 29.75)]).unwrap();
    scene.set_desired_distance_curve(id, profile).unwrap();
    assert_eq!(scene.position(id, 30.0, 0).unwrap(), 0.0);
    assert_abs_diff_eq!(scene.position(id, 90.0, 0).unwrap(), 14.875, epsilon = 1e-3);
    assert!(scene.set_desired_distance_curve(VehicleId(5), Curve::constant(0.0)).is_err());
}
