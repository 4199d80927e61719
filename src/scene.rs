//! What gets drawn: the ground plane plus one mesh per animated particle.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec3, Vec4};

use crate::animation::{Demo, Task};
use crate::mesh::{Mesh, MeshInstance};
use crate::particle::ReportedPosition;
use crate::world::World;

const GROUND_COLOR: Vec4 = Vec4::new(0.55, 0.55, 0.55, 1.0);
const PARTICLE_COLOR: Vec4 = Vec4::new(0.2, 0.45, 1.0, 1.0);
const GROUND_SCALE: f32 = 5.0;
const PARTICLE_SCALE: f32 = 0.1;

fn ground_mesh() -> Mesh {
    let mut mesh = Mesh::quad().with_color(GROUND_COLOR);
    mesh.scale(Vec3::splat(GROUND_SCALE));
    mesh
}

fn particle_mesh(position: Vec3) -> Mesh {
    let mut mesh = Mesh::quad().with_color(PARTICLE_COLOR);
    mesh.translate(position)
        .scale(Vec3::splat(PARTICLE_SCALE))
        .rotate(FRAC_PI_2, Vec3::X);
    mesh
}

/// Scene state for one run.
///
/// Physics state lives in the [`World`] or [`Demo`]; after every update the
/// resulting positions are pushed into the matching meshes.
#[derive(Debug, Clone)]
pub struct Scene {
    task: Task,
    ground: Mesh,
    demo: Demo,
    demo_mesh: Mesh,
    world: World,
    particle_meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new(task: Task, world: World, reported: ReportedPosition) -> Self {
        let mut world = world;
        world.set_reported_position(reported);
        let demo = Demo::new(task).with_reported_position(reported);
        let demo_mesh = particle_mesh(demo.position());
        let particle_meshes = world.positions().map(particle_mesh).collect();

        Self {
            task,
            ground: ground_mesh(),
            demo,
            demo_mesh,
            world,
            particle_meshes,
        }
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advance the active animation to `time` and move the meshes.
    ///
    /// Returns the number of bounces resolved.
    pub fn update(&mut self, time: f32, delta: f32) -> usize {
        if self.task.uses_world() {
            let bounces = self.world.step(time);
            for (mesh, position) in self.particle_meshes.iter_mut().zip(self.world.positions()) {
                mesh.set_pos(position);
            }
            bounces
        } else {
            let bounce = self.demo.advance(time, delta);
            self.demo_mesh.set_pos(self.demo.position());
            usize::from(bounce.is_some())
        }
    }

    /// Meshes to draw this frame, ground plane first.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        let particles: &[Mesh] = if self.task.uses_world() {
            &self.particle_meshes
        } else {
            std::slice::from_ref(&self.demo_mesh)
        };
        std::iter::once(&self.ground).chain(particles)
    }

    pub fn instances(&self) -> Vec<MeshInstance> {
        self.meshes().map(Mesh::to_instance).collect()
    }
}
