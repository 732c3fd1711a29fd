//! Frame-stepped motion
//!
//! Every motion here is pushed forward by its owner, one frame at a time.
//! Nothing owns a thread or a timer.

/// Outcome of a single [`Motion::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionStatus {
    /// More frames are needed
    Running,
    /// The motion reached its rest value; further steps are no-ops
    Finished,
}

impl MotionStatus {
    pub fn is_finished(self) -> bool {
        self == MotionStatus::Finished
    }
}

/// A one-dimensional value that evolves over time
pub trait Motion {
    /// Advance by `dt` seconds
    fn step(&mut self, dt: f32) -> MotionStatus;

    /// Current value
    fn value(&self) -> f32;

    /// Current velocity in units per second
    fn velocity(&self) -> f32;

    /// Where the motion will come to rest
    fn final_value(&self) -> f32;
}
