//! Blinc Animation System
//!
//! Frame-driven motion primitives.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Fling Friction**: Exponential deceleration with landing prediction
//! - **Timed Motion**: Duration-based interpolation along bezier curves
//! - **Pushed, not pulling**: A [`FrameScheduler`] feeds frame time into
//!   anything implementing [`FrameDriven`]; no motion owns a thread

pub mod easing;
pub mod friction;
pub mod motion;
pub mod scheduler;
pub mod spring;
pub mod timed;

pub use easing::Curve;
pub use friction::{predict_fling_distance, FrictionMotion};
pub use motion::{Motion, MotionStatus};
pub use scheduler::{FrameDriven, FrameScheduler};
pub use spring::{Spring, SpringConfig};
pub use timed::TimedMotion;
