//! The simulation driver: an owned collection of independent particles.

use glam::Vec3;
use rand::Rng;

use crate::particle::{Particle, ReportedPosition};

/// Gravity used by the built-in scenes.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Number of particles in [`World::scattered`] scenes.
pub const SCATTERED_COUNT: usize = 10;

/// Owns every particle of a run and advances them to a shared clock time.
///
/// Particles never interact with each other, only with the ground plane.
#[derive(Debug, Clone, Default)]
pub struct World {
    particles: Vec<Particle>,
    /// Mode forced on every particle, including later spawns.
    reported: Option<ReportedPosition>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world from an existing set of particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            reported: None,
        }
    }

    /// Drop `count` particles from rest at random grid points above the plane.
    ///
    /// Horizontal coordinates are picked from `{-2.5, -1.5, -0.5, 0.5, 1.5}`
    /// and heights from `{1, 2, 3, 4, 5}`.
    pub fn scattered<R: Rng>(rng: &mut R, count: usize) -> Self {
        let particles = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(0..5) as f32 - 2.5,
                    rng.gen_range(0..5) as f32 + 1.0,
                    rng.gen_range(0..5) as f32 - 2.5,
                );
                Particle::new(position, Vec3::ZERO, GRAVITY)
            })
            .collect();
        Self::from_particles(particles)
    }

    /// Add a particle. Particles live until the world is dropped.
    ///
    /// If a reporting mode was set on the world, it overrides the
    /// particle's own.
    pub fn spawn(&mut self, mut particle: Particle) {
        if let Some(reported) = self.reported {
            particle.set_reported_position(reported);
        }
        self.particles.push(particle);
    }

    /// Apply the same bounce-frame reporting to every particle, present and
    /// future.
    pub fn set_reported_position(&mut self, reported: ReportedPosition) {
        self.reported = Some(reported);
        for particle in &mut self.particles {
            particle.set_reported_position(reported);
        }
    }

    /// Advance every particle to `current_time`.
    ///
    /// Returns how many particles bounced during this step.
    pub fn step(&mut self, current_time: f32) -> usize {
        self.particles
            .iter_mut()
            .filter_map(|p| p.update(current_time))
            .count()
    }

    /// Current position of each particle, in spawn order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.particles.iter().map(Particle::position)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scattered_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let world = World::scattered(&mut rng, SCATTERED_COUNT);

        assert_eq!(world.len(), SCATTERED_COUNT);
        for p in world.particles() {
            let r = p.reference_position();
            assert!((-2.5..=1.5).contains(&r.x));
            assert!((-2.5..=1.5).contains(&r.z));
            assert!((1.0..=5.0).contains(&r.y));
            assert_eq!(r.y.fract(), 0.0);
            assert_eq!(p.reference_velocity(), Vec3::ZERO);
            assert_eq!(p.acceleration(), GRAVITY);
        }
    }

    #[test]
    fn test_step_advances_all_particles() {
        let mut world = World::new();
        world.spawn(Particle::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, GRAVITY));
        world.spawn(Particle::new(Vec3::new(1.0, 3.0, 0.0), Vec3::ZERO, GRAVITY));

        assert_eq!(world.step(1.0), 0);
        let ys: Vec<f32> = world.positions().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.5, 2.5]);
    }

    #[test]
    fn test_step_counts_bounces() {
        let mut world = World::from_particles(vec![
            Particle::new(Vec3::new(0.0, 0.1, 0.0), Vec3::ZERO, GRAVITY),
            Particle::new(Vec3::new(0.0, 0.2, 0.0), Vec3::ZERO, GRAVITY),
            Particle::new(Vec3::new(0.0, 9.0, 0.0), Vec3::ZERO, GRAVITY),
        ]);
        assert_eq!(world.step(1.0), 2);
        assert_eq!(world.step(1.0), 0);
    }

    #[test]
    fn test_reported_position_applies_to_all() {
        let mut world = World::from_particles(vec![
            Particle::new(Vec3::new(0.0, 0.1, 0.0), Vec3::ZERO, GRAVITY),
            Particle::new(Vec3::new(0.0, 0.2, 0.0), Vec3::ZERO, GRAVITY),
        ]);
        world.set_reported_position(ReportedPosition::Unclamped);
        world.step(1.0);
        assert!(world.positions().all(|p| p.y < 0.0));
    }

    #[test]
    fn test_reported_position_applies_to_later_spawns() {
        let mut world = World::new();
        world.set_reported_position(ReportedPosition::Unclamped);
        world.spawn(Particle::new(Vec3::new(0.0, 0.1, 0.0), Vec3::ZERO, GRAVITY));
        assert_eq!(
            world.particles()[0].reported_position(),
            ReportedPosition::Unclamped
        );

        world.step(1.0);
        assert!(world.positions().all(|p| p.y < 0.0));
    }

    #[test]
    fn test_spawn_keeps_own_mode_when_world_has_none() {
        let mut world = World::new();
        world.spawn(
            Particle::new(Vec3::Y, Vec3::ZERO, GRAVITY)
                .with_reported_position(ReportedPosition::Unclamped),
        );
        assert_eq!(
            world.particles()[0].reported_position(),
            ReportedPosition::Unclamped
        );
    }

    #[test]
    fn test_empty_world() {
        let mut world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.step(3.0), 0);
        assert_eq!(world.positions().len(), 0);
    }
}
