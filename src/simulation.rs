//! Frame driver.
//!
//! One tick runs, in order: camera input, clear, body update, ray emission
//! from the updated bodies, ray transport and compositing. Emission and
//! transport both read the same post-update body slice, which nothing
//! mutates until the next tick.

use crate::body::Body;
use crate::camera::{Camera, MoveInput};
use crate::config::SimConfig;
use crate::display::Display;
use crate::emitter::RayEmitter;
use crate::error::SimResult;
use crate::framebuffer::{PixelBuffer, Rgb};
use crate::gravity::GravityField;
use crate::integrator::BodyIntegrator;
use crate::ray::LightRay;
use crate::ray_integrator::RayIntegrator;
use crate::scenario::generate_population;
use crate::stats::FrameStats;
use tracing::{debug, info};

pub struct Simulation {
    field: GravityField,
    bodies: Vec<Body>,
    rays: Vec<LightRay>,
    camera: Camera,
    buffer: PixelBuffer,
    background: Rgb,
    body_integrator: BodyIntegrator,
    emitter: RayEmitter,
    ray_integrator: RayIntegrator,
    tick: u64,
}

impl Simulation {
    /// Seeded random population plus the central body.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let bodies = generate_population(&config)?;
        Self::with_bodies(config, bodies)
    }

    pub fn with_bodies(config: SimConfig, bodies: Vec<Body>) -> SimResult<Self> {
        config.validate()?;
        let field = GravityField::new(config.g);
        let camera = Camera::new(
            config.camera_origin(),
            config.focal_length,
            config.camera_speed,
            config.width,
            config.height,
        )?;
        let background = Rgb::from(config.background);
        info!(
            bodies = bodies.len(),
            width = config.width,
            height = config.height,
            fps = config.fps,
            "simulation ready"
        );
        Ok(Self {
            field,
            buffer: PixelBuffer::new(config.width, config.height, background),
            background,
            body_integrator: BodyIntegrator::new(field),
            emitter: RayEmitter::new(config.light_speed, config.ray_mass),
            ray_integrator: RayIntegrator::new(
                field,
                config.dt(),
                config.max_ray_depth,
                config.max_active_rays,
            ),
            bodies,
            rays: Vec::new(),
            camera,
            tick: 0,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn rays(&self) -> &[LightRay] {
        &self.rays
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Inject rays directly into the active set.
    pub fn push_rays(&mut self, rays: impl IntoIterator<Item = LightRay>) {
        self.rays.extend(rays);
    }

    /// Run one tick and return its statistics. The finished frame is
    /// available from [`Simulation::frame`] afterwards.
    pub fn tick(&mut self, input: MoveInput) -> FrameStats {
        self.tick += 1;
        self.camera.apply_input(input);
        self.buffer.clear(self.background);

        self.body_integrator.step(&mut self.bodies);

        let bodies: &[Body] = &self.bodies;
        let (width, height) = (self.buffer.width(), self.buffer.height());
        let fresh = self.emitter.emit_all(bodies, &self.camera, width, height);
        let emitted = fresh.len();

        let mut active = std::mem::take(&mut self.rays);
        active.extend(fresh);
        let (next, counts) = self
            .ray_integrator
            .step(active, bodies, &self.camera, &mut self.buffer);
        self.rays = next;

        let mut stats = FrameStats {
            tick: self.tick,
            bodies: self.bodies.len(),
            emitted,
            active: self.rays.len(),
            lit_pixels: self.buffer.count_not(self.background),
            total_energy: self.field.total_energy(&self.bodies),
            ..FrameStats::default()
        };
        stats.absorb(counts);
        debug!("{stats}");
        stats
    }

    /// Tick, then hand the frame to `display`.
    pub fn step<D: Display + ?Sized>(
        &mut self,
        input: MoveInput,
        display: &mut D,
    ) -> SimResult<FrameStats> {
        let stats = self.tick(input);
        display.present(&self.buffer, stats.tick)?;
        Ok(stats)
    }
}
