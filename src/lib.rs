//! # particle-bounce
//!
//! Kinematic particle animation: particles fall under constant acceleration
//! and bounce elastically off a ground plane at height zero, rendered in real
//! time with wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_bounce::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_task(Task::Collection)
//!         .with_time_scale(1.5)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a closed-form trajectory segment, not an integrator.
//! Calling [`Particle::update`] with the current clock time evaluates
//!
//! ```text
//! p(t) = p0 + v0 * (t - t0) + 0.5 * a * (t - t0)^2
//! ```
//!
//! and, when the result lies below the plane, starts a new segment on the
//! plane with the vertical velocity reflected.
//!
//! ### World
//!
//! A [`World`] owns every particle of a run and advances them all to the
//! same time once per frame. Particles never interact with each other.
//!
//! ### Tasks
//!
//! [`Task`] picks one of six progressive exercises, from a particle falling
//! at constant speed up to a whole collection of bouncing particles.
//!
//! ### Frame context
//!
//! Camera, input and clock live together in a [`FrameContext`] owned by the
//! runner and passed to the update and render steps.

pub mod animation;
pub mod error;
mod gpu;
pub mod input;
pub mod mesh;
pub mod particle;
pub mod scene;
mod simulation;
pub mod time;
pub mod world;

pub use animation::{Demo, Task};
pub use error::{GpuError, SimulationError};
pub use glam::{Vec3, Vec4};
pub use gpu::{Camera, Movement};
pub use input::Input;
pub use mesh::{Mesh, MeshInstance};
pub use particle::{Bounce, Particle, ReportedPosition, GROUND_HEIGHT};
pub use scene::Scene;
pub use simulation::{FrameContext, Simulation};
pub use time::Time;
pub use world::{World, GRAVITY};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_bounce::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::Task;
    pub use crate::error::SimulationError;
    pub use crate::gpu::Camera;
    pub use crate::particle::{Particle, ReportedPosition};
    pub use crate::simulation::Simulation;
    pub use crate::world::{World, GRAVITY};
    pub use glam::Vec3;
}
