//! Real-time N-body gravity with a particle approximation of
//! gravitational lensing.
//!
//! Bodies attract each other under Newtonian gravity. Every tick each body
//! visible to a pinhole camera emits one light ray per silhouette pixel;
//! rays are bent by the same field on their way to the camera and land in
//! a pixel buffer handed to a display collaborator.

pub mod body;
pub mod camera;
pub mod config;
pub mod display;
pub mod emitter;
pub mod error;
pub mod framebuffer;
pub mod gravity;
pub mod integrator;
pub mod ray;
pub mod ray_integrator;
pub mod record;
pub mod scenario;
pub mod simulation;
pub mod stats;
pub mod vector;

pub use body::Body;
pub use camera::{Camera, MoveInput};
pub use config::SimConfig;
pub use display::{Display, NullDisplay, PngSnapshots};
pub use emitter::RayEmitter;
pub use error::{SimError, SimResult};
pub use framebuffer::{PixelBuffer, Rgb};
pub use gravity::{GravityField, Particle};
pub use integrator::BodyIntegrator;
pub use ray::LightRay;
pub use ray_integrator::{RayFate, RayIntegrator, RayStepCounts};
pub use record::RunRecorder;
pub use simulation::Simulation;
pub use stats::FrameStats;
pub use vector::Vec3;
