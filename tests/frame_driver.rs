//! End-to-end checks of a full tick through `Simulation`.
use approx::assert_relative_eq;
use lensim::{Body, LightRay, MoveInput, NullDisplay, Rgb, SimConfig, Simulation, Vec3};

fn config() -> SimConfig {
    SimConfig {
        body_count: 0,
        ..SimConfig::default()
    }
}

/// Body on the optical axis with an apparent radius of one pixel.
fn unit_disk_body(velocity: Vec3) -> Body {
    Body::new(1.0, 1.0, Vec3::new(400.0, 300.0, 0.0), velocity, Rgb(255, 0, 0)).unwrap()
}

#[test]
fn isolated_body_remains_stationary() {
    let start = Vec3::new(250.0, 100.0, 30.0);
    let body = Body::at_rest(800.0, 100.0, start).unwrap();
    let mut sim = Simulation::with_bodies(config(), vec![body]).unwrap();
    for _ in 0..50 {
        sim.tick(MoveInput::default());
    }
    assert_eq!(sim.bodies()[0].position, start);
    assert_eq!(sim.bodies()[0].velocity, Vec3::zeros());
}

#[test]
fn without_gravity_rays_land_on_their_source_pixels() {
    let cfg = SimConfig { g: 0.0, ..config() };
    let mut sim = Simulation::with_bodies(cfg, vec![unit_disk_body(Vec3::zeros())]).unwrap();

    // depth 400 at 20000 / 144 per tick: the first batch crosses on tick 3
    let first = sim.tick(MoveInput::default());
    assert_eq!(first.emitted, 5);
    assert_eq!(first.lit_pixels, 0);
    assert_eq!(sim.tick(MoveInput::default()).lit_pixels, 0);

    let third = sim.tick(MoveInput::default());
    assert_eq!(third.composited, 5);
    assert_eq!(third.lit_pixels, 5);
    let frame = sim.frame();
    for (x, y) in [(400, 300), (399, 300), (401, 300), (400, 299), (400, 301)] {
        assert_eq!(frame.get(x, y), Some(Rgb(255, 0, 0)), "pixel ({x}, {y})");
    }
}

#[test]
fn rays_are_emitted_from_updated_body_positions() {
    let cfg = SimConfig { g: 0.0, ..config() };
    let body = unit_disk_body(Vec3::new(4.0, 0.0, 0.0));
    let mut sim = Simulation::with_bodies(cfg, vec![body]).unwrap();
    sim.tick(MoveInput::default());

    let body_x = sim.bodies()[0].position.x;
    assert_relative_eq!(body_x, 404.0);
    let rays = sim.rays();
    assert_eq!(rays.len(), 5);
    let mean_x = rays.iter().map(|r| r.position.x).sum::<f64>() / rays.len() as f64;
    assert_relative_eq!(mean_x, body_x, epsilon = 1e-9);
}

#[test]
fn ray_past_max_depth_is_removed_without_a_write() {
    let mut sim = Simulation::with_bodies(config(), Vec::new()).unwrap();
    let start = Vec3::new(400.0, 300.0, 2500.0);
    let mut ray = LightRay::toward_camera(start, 100.0, 1e-3, 2900.0, Rgb::WHITE);
    ray.velocity = Vec3::new(0.0, 0.0, 100.0);
    sim.push_rays([ray]);

    let stats = sim.tick(MoveInput::default());
    assert_eq!(stats.escaped, 1);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.lit_pixels, 0);
}

#[test]
fn coincident_bodies_are_left_alone() {
    let p = Vec3::new(100.0, 100.0, 10.0);
    let bodies = vec![
        Body::at_rest(500.0, 100.0, p).unwrap(),
        Body::at_rest(700.0, 100.0, p).unwrap(),
    ];
    let mut sim = Simulation::with_bodies(config(), bodies).unwrap();
    let stats = sim.tick(MoveInput::default());

    assert_eq!(stats.bodies, 2);
    for body in sim.bodies() {
        assert_eq!(body.position, p);
        assert_eq!(body.velocity, Vec3::zeros());
    }
}

#[test]
fn active_ray_cap_evicts_excess() {
    let cfg = SimConfig {
        g: 0.0,
        max_active_rays: 3,
        ..config()
    };
    let mut sim = Simulation::with_bodies(cfg, vec![unit_disk_body(Vec3::zeros())]).unwrap();
    let stats = sim.tick(MoveInput::default());
    assert_eq!(stats.evicted, 2);
    assert_eq!(sim.rays().len(), 3);
}

#[test]
fn camera_input_moves_the_view() {
    let mut sim = Simulation::with_bodies(config(), Vec::new()).unwrap();
    sim.step(MoveInput::new(-1, 1, 0), &mut NullDisplay).unwrap();
    assert_eq!(sim.camera().position(), Vec3::new(395.0, 305.0, -400.0));
}
