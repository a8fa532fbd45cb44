use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{Point3, Vector3};

use rust_orrery::config::Config;
use rust_orrery::model::{
    BodyID, BodyParams, FramePacer, ManualClock, Motion, NodeKind, RingMesh, SceneHierarchy,
    StepRenderer, WorldTransforms,
};

const SUN: BodyID = BodyID(0);
const PLANET_1: BodyID = BodyID(1);
const PLANET_2: BodyID = BodyID(2);
const INNER_MOON: BodyID = BodyID(3);
const OUTER_MOON: BodyID = BodyID(4);
const INNER_ORBIT: BodyID = BodyID(5);
const OUTER_MOON_ORBIT: BodyID = BodyID(8);

fn sun_and_planet() -> SceneHierarchy {
    let mut sun = BodyParams::new("sun", NodeKind::Body, None);
    sun.spin = Motion::new(0.01, 0.0, Vector3::y()).unwrap();

    let mut planet = BodyParams::new("planet 1", NodeKind::Body, Some(SUN));
    planet.orbit = Motion::new(0.3, 0.0, Vector3::y()).unwrap();
    planet.spin = Motion::new(0.3, 0.1, Vector3::y()).unwrap();
    planet.orbit_radius = 1.5;
    planet.scale = Vector3::repeat(0.7);

    SceneHierarchy::from_params(vec![sun, planet]).unwrap()
}

fn reference_scene() -> SceneHierarchy {
    Config::default().scene.build().unwrap()
}

#[test]
fn test_planet_orbits_at_its_radius() {
    let mut scene = sun_and_planet();
    scene.advance(1.0);

    let transforms = scene.compute_world_transforms();
    let distance = nalgebra::distance(&transforms.position(SUN), &transforms.position(PLANET_1));
    assert_abs_diff_eq!(distance, 1.5, epsilon = 1e-5);
    // Still in the sun's equatorial plane
    assert_abs_diff_eq!(transforms.position(PLANET_1).y, 0.0, epsilon = 1e-6);
}

#[test]
fn test_per_step_offsets_make_step_count_matter() {
    let mut twice = sun_and_planet();
    twice.advance(1.0);
    twice.advance(1.0);

    let mut once = sun_and_planet();
    once.advance(2.0);

    // Same total rate, but the offset was applied twice vs once
    let twice_planet = twice.get_body(PLANET_1);
    let once_planet = once.get_body(PLANET_1);
    assert_abs_diff_eq!(twice_planet.phase.rotation_angle, 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(once_planet.phase.rotation_angle, 0.7, epsilon = 1e-6);
    assert_ne!(
        twice.compute_world_transforms().get(PLANET_1),
        once.compute_world_transforms().get(PLANET_1)
    );

    // Without offsets the two agree
    let sun_twice = *twice.compute_world_transforms().get(SUN);
    let sun_once = *once.compute_world_transforms().get(SUN);
    assert_relative_eq!(sun_twice, sun_once, epsilon = 1e-6);
}

#[test]
fn test_reference_distances() {
    let mut scene = reference_scene();
    for _ in 0..17 {
        scene.advance(0.1);
    }
    let transforms = scene.compute_world_transforms();
    let dist = |a, b| nalgebra::distance(&transforms.position(a), &transforms.position(b));

    // Every child inherits the sun's half scale, and moons inherit planet 2's
    assert_abs_diff_eq!(dist(SUN, PLANET_1), 0.75, epsilon = 1e-5);
    assert_abs_diff_eq!(dist(SUN, PLANET_2), 1.5, epsilon = 1e-5);
    assert_abs_diff_eq!(dist(PLANET_2, INNER_MOON), 0.2, epsilon = 1e-5);
    assert_abs_diff_eq!(dist(PLANET_2, OUTER_MOON), 0.35, epsilon = 1e-5);
}

#[test]
fn test_rings_follow_anchor_but_never_spin() {
    let mut scene = reference_scene();
    let before = scene.compute_world_transforms();
    for _ in 0..10 {
        scene.advance(0.1);
    }
    let after = scene.compute_world_transforms();

    // The root ring has nothing to follow
    assert_eq!(before.get(INNER_ORBIT), after.get(INNER_ORBIT));
    for body in scene.bodies() {
        if body.params.kind == NodeKind::OrbitRing {
            assert_eq!(body.phase.rotation_angle, 0.0);
            assert_eq!(body.phase.orbit_angle, 0.0);
        }
    }

    // Moon rings are centred on planet 2 wherever it goes
    assert_relative_eq!(
        after.position(OUTER_MOON_ORBIT),
        after.position(PLANET_2),
        epsilon = 1e-6
    );
}

#[test]
fn test_inner_orbit_ring_is_tilted() {
    let scene = reference_scene();
    let transforms = scene.compute_world_transforms();
    let ring = RingMesh::generate(100, Point3::new(1.0, 0.0, 0.0));

    // Tilt is about X, so ring points keep their x and leave the XY plane
    let start = transforms
        .get(INNER_ORBIT)
        .transform_point(&ring.positions[0]);
    assert_relative_eq!(start.x, 1.5, epsilon = 1e-5);
    for pt in ring.positions.iter() {
        let world = transforms.get(INNER_ORBIT).transform_point(pt);
        assert_abs_diff_eq!(world.coords.norm(), 1.5, epsilon = 1e-4);
    }
    let top = transforms
        .get(INNER_ORBIT)
        .transform_point(&Point3::new(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(top.z, 1.5 * 1.0f32.sin(), epsilon = 1e-5);
}

#[derive(Default)]
struct StepLog(Vec<WorldTransforms>);

impl StepRenderer for StepLog {
    fn submit(&mut self, transforms: &WorldTransforms) {
        self.0.push(transforms.clone());
    }
}

#[test]
fn test_paced_run_matches_direct_advance() {
    let config = Config::default();
    let clock = ManualClock::new(0.0);
    let mut paced = reference_scene();
    let mut pacer = FramePacer::new(
        config.pacing.update_interval_seconds,
        config.pacing.step_size,
        0.0,
    );
    let mut log = StepLog::default();

    // Poll every 5ms for a second: at most one step per 20ms window
    for _ in 0..200 {
        clock.advance_by(0.005);
        pacer.poll(&clock, &mut paced, &mut log);
    }
    let steps = pacer.steps_taken();
    assert!(steps > 0 && steps <= 50, "took {} steps", steps);
    assert_eq!(log.0.len() as u64, steps);

    let mut direct = reference_scene();
    for _ in 0..steps {
        direct.advance(config.pacing.step_size);
    }
    assert_eq!(log.0.last(), Some(&direct.compute_world_transforms()));
}
