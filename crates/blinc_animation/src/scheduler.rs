//! Frame scheduler
//!
//! Measures time between frames and pushes it into anything that animates.
//! The platform's vsync callback calls [`FrameScheduler::frame`]; tests call
//! [`FrameScheduler::frame_with`] to control time explicitly.

use std::time::{Duration, Instant};

/// Something advanced once per frame
pub trait FrameDriven {
    /// Advance by `dt` seconds. Returns true while more frames are needed.
    fn tick(&mut self, dt: f32) -> bool;
}

/// Drives [`FrameDriven`] targets from wall-clock frame time
#[derive(Debug)]
pub struct FrameScheduler {
    last_frame: Option<Instant>,
    target_fps: u32,
    max_frame_step: f32,
    frame_count: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            target_fps: 120,
            max_frame_step: 0.1,
            frame_count: 0,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Nominal frame duration at the target rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.target_fps as f32)
    }

    /// Longest step handed to targets; longer gaps (app suspended, debugger
    /// pause) are clamped to this
    pub fn set_max_frame_step(&mut self, seconds: f32) {
        self.max_frame_step = seconds.max(0.0);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run one frame using the time elapsed since the previous frame.
    ///
    /// The first frame after creation or [`reset`](Self::reset) uses the
    /// nominal frame interval.
    pub fn frame<T: FrameDriven + ?Sized>(&mut self, target: &mut T) -> bool {
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(last) => (now - last).as_secs_f32(),
            None => self.frame_interval().as_secs_f32(),
        };
        self.last_frame = Some(now);
        self.frame_with(target, dt)
    }

    /// Run one frame with an explicit step
    pub fn frame_with<T: FrameDriven + ?Sized>(&mut self, target: &mut T, dt: f32) -> bool {
        let dt = dt.clamp(0.0, self.max_frame_step);
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, dt, "frame");
        target.tick(dt)
    }

    /// Forget the previous frame time, e.g. after the animation loop idled
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
