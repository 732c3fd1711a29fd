//! Damped spring physics
//!
//! Integrated with RK4. Large frame steps are split into fixed sub-steps so a
//! stiff spring stays stable when a frame is dropped.

use crate::motion::{Motion, MotionStatus};

/// Longest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target under which the spring may settle
    pub rest_distance: f32,
    /// Speed under which the spring may settle
    pub rest_speed: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            ..Default::default()
        }
    }

    /// Fast and firm, barely overshoots
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Slow and soft
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Very fast, no overshoot
    pub fn snappy() -> Self {
        Self::new(600.0, 49.0, 1.0)
    }

    /// Damping that separates oscillation from overdamped return
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            mass: 1.0,
            rest_distance: 0.5,
            rest_speed: 1.0,
        }
    }
}

/// A spring pulling a value toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Spring at rest on `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        let mass = if config.mass > 0.0 { config.mass } else { 1.0 };
        Self {
            config: SpringConfig { mass, ..config },
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_target(mut self, target: f32) -> Self {
        self.target = target;
        self
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_distance
            && self.velocity.abs() < self.config.rest_speed
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn integrate(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);
        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);
        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);
        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

impl Motion for Spring {
    fn step(&mut self, dt: f32) -> MotionStatus {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return MotionStatus::Finished;
        }
        if dt.is_nan() || dt <= 0.0 {
            return MotionStatus::Running;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            MotionStatus::Finished
        } else {
            MotionStatus::Running
        }
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn final_value(&self) -> f32 {
        self.target
    }
}
