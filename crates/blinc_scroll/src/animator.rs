//! The single animation slot of a scrollable
//!
//! Fling, spring-back, snap and programmatic scrolls all run through one
//! [`ScrollAnimator`]. Starting an animation replaces whatever was running,
//! so two motions never fight over the offset within a frame.

use blinc_animation::{FrictionMotion, Motion, MotionStatus, Spring, TimedMotion};

use crate::source::ScrollSource;

/// What an animation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Released with velocity, decelerating by friction
    Fling,
    /// Returning from overscroll to the nearest edge
    SpringBack,
    /// Landing on a snap offset
    Snap,
    /// Started by a command such as `animate_to` or `scroll_page`
    Programmatic,
}

/// The motion curve behind an animation
#[derive(Debug, Clone)]
pub enum ScrollMotion {
    Friction(FrictionMotion),
    Spring(Spring),
    Timed(TimedMotion),
}

impl ScrollMotion {
    fn as_motion(&self) -> &dyn Motion {
        match self {
            ScrollMotion::Friction(m) => m,
            ScrollMotion::Spring(m) => m,
            ScrollMotion::Timed(m) => m,
        }
    }

    fn as_motion_mut(&mut self) -> &mut dyn Motion {
        match self {
            ScrollMotion::Friction(m) => m,
            ScrollMotion::Spring(m) => m,
            ScrollMotion::Timed(m) => m,
        }
    }

    pub fn value(&self) -> f32 {
        self.as_motion().value()
    }

    pub fn velocity(&self) -> f32 {
        self.as_motion().velocity()
    }

    pub fn final_value(&self) -> f32 {
        self.as_motion().final_value()
    }
}

/// A running animation
#[derive(Debug, Clone)]
pub struct ActiveAnimation {
    pub kind: AnimationKind,
    pub source: ScrollSource,
    motion: ScrollMotion,
    last_value: f32,
}

impl ActiveAnimation {
    pub fn motion(&self) -> &ScrollMotion {
        &self.motion
    }
}

/// One frame of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub kind: AnimationKind,
    pub source: ScrollSource,
    /// Motion position after the step
    pub value: f32,
    /// Change of the motion position during the step
    pub delta: f32,
    pub velocity: f32,
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    active: Option<ActiveAnimation>,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `motion`, replacing any running animation
    pub fn start(&mut self, kind: AnimationKind, source: ScrollSource, motion: ScrollMotion) {
        if let Some(previous) = self.active.take() {
            tracing::debug!(previous = ?previous.kind, next = ?kind, "animation replaced");
        } else {
            tracing::debug!(?kind, ?source, "animation started");
        }
        let last_value = motion.value();
        self.active = Some(ActiveAnimation {
            kind,
            source,
            motion,
            last_value,
        });
    }

    /// Stop whatever runs. Returns the stopped animation, `None` when idle.
    pub fn stop(&mut self) -> Option<ActiveAnimation> {
        let stopped = self.active.take();
        if let Some(animation) = &stopped {
            tracing::debug!(kind = ?animation.kind, "animation stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<AnimationKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    pub fn is_running_kind(&self, kind: AnimationKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn active(&self) -> Option<&ActiveAnimation> {
        self.active.as_ref()
    }

    /// Advance the running animation by `dt`. A finished animation is
    /// cleared after its last frame is reported.
    pub fn step(&mut self, dt: f32) -> Option<AnimationFrame> {
        let animation = self.active.as_mut()?;
        let status = animation.motion.as_motion_mut().step(dt);
        let value = animation.motion.value();
        let frame = AnimationFrame {
            kind: animation.kind,
            source: animation.source,
            value,
            delta: value - animation.last_value,
            velocity: animation.motion.velocity(),
            finished: status == MotionStatus::Finished,
        };
        animation.last_value = value;
        if frame.finished {
            self.active = None;
        }
        Some(frame)
    }
}
