//! Seeded random placement of the initial bodies.

use crate::body::Body;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::framebuffer::Rgb;
use crate::vector::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Uniform;
use tracing::warn;

const PLACEMENT_ATTEMPTS: usize = 200;

fn uniform(field: &'static str, [lo, hi]: [f64; 2]) -> SimResult<Uniform<f64>> {
    Uniform::new_inclusive(lo, hi).map_err(|_| SimError::InvalidConfiguration {
        field,
        value: hi - lo,
    })
}

/// Pick a position at least `min_distance` from every existing body.
///
/// Falls back to the best-separated candidate when no draw satisfies the
/// bound.
fn generate_unique_position(
    rng: &mut StdRng,
    existing: &[Body],
    ranges: &[Uniform<f64>; 3],
    min_distance: f64,
) -> Vec3 {
    let mut best = Vec3::zeros();
    let mut best_gap = f64::NEG_INFINITY;
    for _ in 0..PLACEMENT_ATTEMPTS {
        let position = Vec3::new(
            rng.sample(&ranges[0]),
            rng.sample(&ranges[1]),
            rng.sample(&ranges[2]),
        );
        let gap = existing
            .iter()
            .map(|b| (position - b.position).norm())
            .fold(f64::INFINITY, f64::min);
        if gap >= min_distance {
            return position;
        }
        if gap > best_gap {
            best = position;
            best_gap = gap;
        }
    }
    warn!(gap = best_gap, min_distance, "no well-separated slot for body");
    best
}

fn bright_color(rng: &mut StdRng) -> Rgb {
    Rgb(
        rng.random_range(96..=255),
        rng.random_range(96..=255),
        rng.random_range(96..=255),
    )
}

/// The fixed central body: centred on screen at `central_depth`.
pub fn central_body(config: &SimConfig) -> SimResult<Body> {
    let position = Vec3::new(
        config.width as f64 / 2.0,
        config.height as f64 / 2.0,
        config.central_depth,
    );
    Body::new(
        config.central_mass,
        config.central_density,
        position,
        Vec3::zeros(),
        Rgb::WHITE,
    )
}

/// Seeded random population followed by the central body.
///
/// Bodies start at rest, spread over the screen rectangle in x/y and over
/// `depth_range` in z.
pub fn generate_population(config: &SimConfig) -> SimResult<Vec<Body>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mass = uniform("mass_range", config.mass_range)?;
    let density = uniform("density_range", config.density_range)?;
    let ranges = [
        uniform("width", [0.0, config.width as f64])?,
        uniform("height", [0.0, config.height as f64])?,
        uniform("depth_range", config.depth_range)?,
    ];

    let central = central_body(config)?;
    let min_distance = central.extent();
    let mut bodies = vec![central];
    for _ in 0..config.body_count {
        let position = generate_unique_position(&mut rng, &bodies, &ranges, min_distance);
        let body = Body::new(
            rng.sample(&mass),
            rng.sample(&density),
            position,
            Vec3::zeros(),
            bright_color(&mut rng),
        )?;
        bodies.push(body);
    }
    bodies.rotate_left(1);
    Ok(bodies)
}
