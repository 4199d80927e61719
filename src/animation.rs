//! Progressive animation exercises.
//!
//! The demo builds up to bouncing particles in six steps. The first five
//! animate a single particle dropped from [`DEMO_START`]; the last one hands
//! the scene over to a [`World`](crate::World) of many particles.

use glam::Vec3;

use crate::particle::{Bounce, Particle, ReportedPosition};
use crate::world::GRAVITY;

/// Where the single demo particle starts.
pub const DEMO_START: Vec3 = Vec3::new(0.0, 2.5, 0.0);

/// Which exercise drives the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Task {
    /// Fall at constant speed by translating with the frame delta.
    ConstantFall,
    /// Fall at constant speed by setting the position from the clock.
    ScriptedFall,
    /// Oscillate above the plane.
    Oscillate,
    /// Fall from rest under gravity, straight through the plane.
    Kinematic,
    /// Fall under gravity and bounce off the plane.
    SingleBounce,
    /// A collection of bouncing particles.
    #[default]
    Collection,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::ConstantFall,
        Task::ScriptedFall,
        Task::Oscillate,
        Task::Kinematic,
        Task::SingleBounce,
        Task::Collection,
    ];

    /// Look up a task by its exercise number, starting at 1.
    pub fn from_number(number: u32) -> Option<Self> {
        let index = number.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    /// Exercise number, starting at 1.
    pub fn number(self) -> u32 {
        match self {
            Task::ConstantFall => 1,
            Task::ScriptedFall => 2,
            Task::Oscillate => 3,
            Task::Kinematic => 4,
            Task::SingleBounce => 5,
            Task::Collection => 6,
        }
    }

    /// Whether this task animates a whole world rather than the demo particle.
    pub fn uses_world(self) -> bool {
        matches!(self, Task::Collection)
    }
}

/// The single particle animated by the first five tasks.
#[derive(Debug, Clone)]
pub struct Demo {
    task: Task,
    position: Vec3,
    bouncer: Particle,
}

impl Demo {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            position: DEMO_START,
            bouncer: Particle::new(DEMO_START, Vec3::ZERO, GRAVITY),
        }
    }

    pub fn with_reported_position(mut self, reported: ReportedPosition) -> Self {
        self.bouncer.set_reported_position(reported);
        self
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Advance to clock time `time`, `delta` seconds after the previous call.
    pub fn advance(&mut self, time: f32, delta: f32) -> Option<Bounce> {
        match self.task {
            Task::ConstantFall => {
                self.position += Vec3::new(0.0, -delta, 0.0);
            }
            Task::ScriptedFall => {
                self.position = DEMO_START + Vec3::new(0.0, -time, 0.0);
            }
            Task::Oscillate => {
                self.position = Vec3::new(0.0, time.sin() + 1.0, 0.0);
            }
            Task::Kinematic => {
                self.position = self.bouncer.position_at(time);
            }
            Task::SingleBounce => {
                let bounce = self.bouncer.update(time);
                self.position = self.bouncer.position();
                return bounce;
            }
            Task::Collection => {}
        }
        None
    }
}
