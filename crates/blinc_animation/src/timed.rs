//! Duration-based motion between two values

use crate::easing::Curve;
use crate::motion::{Motion, MotionStatus};

/// Interpolates `from → to` over `duration` seconds along a [`Curve`]
#[derive(Clone, Debug)]
pub struct TimedMotion {
    from: f32,
    to: f32,
    duration: f32,
    curve: Curve,
    elapsed: f32,
    value: f32,
    velocity: f32,
}

impl TimedMotion {
    /// A zero or negative duration finishes on the first step
    pub fn new(from: f32, to: f32, duration: f32, curve: Curve) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            curve,
            elapsed: 0.0,
            value: from,
            velocity: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }
}

impl Motion for TimedMotion {
    fn step(&mut self, dt: f32) -> MotionStatus {
        if self.progress() >= 1.0 && self.value == self.to {
            return MotionStatus::Finished;
        }

        let previous = self.value;
        self.elapsed += dt.max(0.0);
        let eased = self.curve.apply(self.progress());
        self.value = self.from + (self.to - self.from) * eased;
        self.velocity = if dt > 0.0 {
            (self.value - previous) / dt
        } else {
            0.0
        };

        if self.progress() >= 1.0 {
            self.value = self.to;
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
        self.to
    }
}
