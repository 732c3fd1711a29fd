//! Fling deceleration
//!
//! Velocity decays exponentially: `v(t) = v0 * e^(k t)` with
//! `k = friction * FRICTION_SCALE`. Integrating gives the position
//! `x(t) = x0 + v0 * (e^(k t) - 1) / k`, which converges to
//! `x0 - v0 / k` as `t` grows.

use crate::motion::{Motion, MotionStatus};

/// Scale turning the user-facing friction coefficient into a decay rate
pub const FRICTION_SCALE: f32 = -4.2;

/// Default friction coefficient for flings
pub const DEFAULT_FRICTION: f32 = 0.6;

/// Speed (units per second) under which a fling stops
pub const DEFAULT_STOP_VELOCITY: f32 = 10.0;

/// Exponentially decelerating motion
#[derive(Clone, Debug)]
pub struct FrictionMotion {
    start: f32,
    initial_velocity: f32,
    rate: f32,
    elapsed: f32,
    stop_velocity: f32,
    value: f32,
    velocity: f32,
    finished: bool,
}

impl FrictionMotion {
    /// Fling from `start` with `velocity`. Non-positive friction falls back
    /// to [`DEFAULT_FRICTION`].
    pub fn new(friction: f32, start: f32, velocity: f32) -> Self {
        let friction = if friction > 0.0 && friction.is_finite() {
            friction
        } else {
            tracing::warn!("invalid fling friction {friction}, using default");
            DEFAULT_FRICTION
        };
        Self {
            start,
            initial_velocity: velocity,
            rate: friction * FRICTION_SCALE,
            elapsed: 0.0,
            stop_velocity: DEFAULT_STOP_VELOCITY,
            value: start,
            velocity,
            finished: velocity.abs() < DEFAULT_STOP_VELOCITY,
        }
    }

    pub fn with_stop_velocity(mut self, stop_velocity: f32) -> Self {
        self.stop_velocity = stop_velocity.abs();
        self.finished = self.velocity.abs() < self.stop_velocity;
        self
    }

    /// Distance travelled from start to rest
    pub fn final_delta(&self) -> f32 {
        -self.initial_velocity / self.rate
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn position_at(&self, t: f32) -> f32 {
        self.start + self.initial_velocity * ((self.rate * t).exp() - 1.0) / self.rate
    }
}

impl Motion for FrictionMotion {
    fn step(&mut self, dt: f32) -> MotionStatus {
        if self.finished {
            return MotionStatus::Finished;
        }
        if dt.is_nan() || dt <= 0.0 {
            return MotionStatus::Running;
        }

        self.elapsed += dt;
        self.value = self.position_at(self.elapsed);
        self.velocity = self.initial_velocity * (self.rate * self.elapsed).exp();

        if self.velocity.abs() < self.stop_velocity {
            self.velocity = 0.0;
            self.finished = true;
            return MotionStatus::Finished;
        }
        MotionStatus::Running
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn final_value(&self) -> f32 {
        self.start + self.final_delta()
    }
}

/// Distance a fling of `velocity` would travel before stopping
pub fn predict_fling_distance(friction: f32, velocity: f32) -> f32 {
    FrictionMotion::new(friction, 0.0, velocity).final_delta()
}
