//! Analytic particle trajectories with ground-plane bounces.
//!
//! A [`Particle`] never integrates step by step. It stores the state of one
//! ballistic segment (where it was, how fast it moved and when) and evaluates
//! the closed-form kinematic equation for any later time:
//!
//! ```text
//! p(t) = p0 + v0 * (t - t0) + 0.5 * a * (t - t0)^2
//! ```
//!
//! When the evaluated position drops below the ground plane the segment is
//! restarted on the plane with the vertical velocity reflected.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use particle_bounce::Particle;
//!
//! let mut ball = Particle::new(Vec3::new(0.0, 2.5, 0.0), Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
//! ball.update(1.0);
//! assert!((ball.position().y - 2.0).abs() < 1e-6);
//! ```

use glam::Vec3;

/// Height of the infinite horizontal ground plane.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Which position a particle reports on the frame a bounce is detected.
///
/// The bounce is detected after the fact: the candidate position of that
/// frame already lies below the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportedPosition {
    /// Report the candidate projected onto the plane, i.e. the contact point.
    #[default]
    Clamped,
    /// Report the raw candidate, which renders slightly below the plane for
    /// one frame.
    Unclamped,
}

/// A resolved collision with the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Clock time at which the collision was resolved.
    pub time: f32,
    /// Contact point on the plane where the new segment starts.
    pub contact: Vec3,
    /// Velocity just before the reflection.
    pub incoming: Vec3,
    /// Velocity just after the reflection.
    pub outgoing: Vec3,
}

/// One particle moving under constant acceleration.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    reference_time: f32,
    reference_position: Vec3,
    reference_velocity: Vec3,
    acceleration: Vec3,
    position: Vec3,
    reported: ReportedPosition,
}

impl Particle {
    /// Create a particle whose first segment starts at time zero.
    pub fn new(position: Vec3, velocity: Vec3, acceleration: Vec3) -> Self {
        Self {
            reference_time: 0.0,
            reference_position: position,
            reference_velocity: velocity,
            acceleration,
            position,
            reported: ReportedPosition::default(),
        }
    }

    /// Start the first segment at `time` instead of zero.
    pub fn with_start_time(mut self, time: f32) -> Self {
        self.reference_time = time;
        self
    }

    /// Choose what [`position`](Self::position) reports on bounce frames.
    pub fn with_reported_position(mut self, reported: ReportedPosition) -> Self {
        self.reported = reported;
        self
    }

    /// Advance the particle to `current_time`.
    ///
    /// `current_time` must not decrease between calls. Returns the bounce
    /// resolved by this call, if any.
    pub fn update(&mut self, current_time: f32) -> Option<Bounce> {
        let candidate = self.position_at(current_time);

        if candidate.y < GROUND_HEIGHT {
            let incoming = self.velocity_at(current_time);
            let outgoing = Vec3::new(incoming.x, -incoming.y, incoming.z);
            let contact = Vec3::new(candidate.x, GROUND_HEIGHT, candidate.z);

            self.reference_velocity = outgoing;
            self.reference_position = contact;
            self.reference_time = current_time;
            self.position = match self.reported {
                ReportedPosition::Clamped => contact,
                ReportedPosition::Unclamped => candidate,
            };

            return Some(Bounce {
                time: current_time,
                contact,
                incoming,
                outgoing,
            });
        }

        self.position = candidate;
        None
    }

    /// Position on the current segment at `time`, ignoring the plane.
    #[inline]
    pub fn position_at(&self, time: f32) -> Vec3 {
        let dt = time - self.reference_time;
        self.reference_position + self.reference_velocity * dt + 0.5 * self.acceleration * dt * dt
    }

    /// Velocity on the current segment at `time`.
    #[inline]
    pub fn velocity_at(&self, time: f32) -> Vec3 {
        self.reference_velocity + self.acceleration * (time - self.reference_time)
    }

    /// Position reported by the last [`update`](Self::update).
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Time at which the current segment began.
    #[inline]
    pub fn reference_time(&self) -> f32 {
        self.reference_time
    }

    /// Position at [`reference_time`](Self::reference_time).
    #[inline]
    pub fn reference_position(&self) -> Vec3 {
        self.reference_position
    }

    /// Velocity at [`reference_time`](Self::reference_time).
    #[inline]
    pub fn reference_velocity(&self) -> Vec3 {
        self.reference_velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    #[inline]
    pub fn reported_position(&self) -> ReportedPosition {
        self.reported
    }

    pub(crate) fn set_reported_position(&mut self, reported: ReportedPosition) {
        self.reported = reported;
    }
}
