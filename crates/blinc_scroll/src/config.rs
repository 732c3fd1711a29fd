//! Scroll configuration

use blinc_animation::friction::{DEFAULT_FRICTION, DEFAULT_STOP_VELOCITY};
use blinc_animation::SpringConfig;

use crate::axis::Axis;
use crate::edge::EdgeEffectKind;
use crate::nested::NestedScrollOptions;
use crate::scrollbar::ScrollBarConfig;
use crate::snap::ScrollSnapOptions;

/// Configuration for one scrollable
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollConfig {
    /// Scroll axis; `None` disables scrolling
    pub axis: Axis,
    /// Content grows from the visual end (bottom/right)
    pub reverse: bool,
    /// Behavior at the content bounds
    pub edge_effect: EdgeEffectKind,
    /// Spring used to return from overscroll
    pub bounce_spring: SpringConfig,
    /// Spring used to land on snap offsets and for smooth programmatic scrolls
    pub snap_spring: SpringConfig,
    /// Coordination with ancestor scrollables
    pub nested_scroll: NestedScrollOptions,
    /// Rest positions after a gesture, if any
    pub snap: Option<ScrollSnapOptions>,
    /// Fling friction coefficient
    pub friction: f32,
    /// Release velocity (pixels/second) under which no fling starts
    pub fling_velocity_threshold: f32,
    /// Release velocities are clamped to this magnitude
    pub max_fling_velocity: f32,
    /// Pixels per density-independent unit
    pub dip_scale: f32,
    /// Scrollbar appearance and behavior
    pub scrollbar: ScrollBarConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            reverse: false,
            edge_effect: EdgeEffectKind::Spring,
            // Stiff, slightly overdamped: critical damping is 2 * sqrt(3000) ≈ 109.5
            bounce_spring: SpringConfig::new(3000.0, 110.0, 1.0),
            snap_spring: SpringConfig::new(400.0, 40.0, 1.0),
            nested_scroll: NestedScrollOptions::default(),
            snap: None,
            friction: DEFAULT_FRICTION,
            fling_velocity_threshold: DEFAULT_STOP_VELOCITY * 2.0,
            max_fling_velocity: 9000.0,
            dip_scale: 1.0,
            scrollbar: ScrollBarConfig::default(),
        }
    }
}

impl ScrollConfig {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Default::default()
        }
    }

    /// Hard stop at the bounds
    pub fn no_bounce() -> Self {
        Self {
            edge_effect: EdgeEffectKind::None,
            ..Default::default()
        }
    }

    /// Fade glow at the bounds
    pub fn fade() -> Self {
        Self {
            edge_effect: EdgeEffectKind::Fade,
            ..Default::default()
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_edge_effect(mut self, edge_effect: EdgeEffectKind) -> Self {
        self.edge_effect = edge_effect;
        self
    }

    pub fn with_nested(mut self, nested_scroll: NestedScrollOptions) -> Self {
        self.nested_scroll = nested_scroll;
        self
    }

    pub fn with_snap(mut self, snap: ScrollSnapOptions) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn with_dip_scale(mut self, dip_scale: f32) -> Self {
        self.dip_scale = dip_scale;
        self
    }

    /// Replace values that would break the engine with safe defaults
    pub(crate) fn normalized(mut self) -> Self {
        if !(self.dip_scale.is_finite() && self.dip_scale > 0.0) {
            tracing::warn!(dip_scale = self.dip_scale, "invalid dip scale, using 1.0");
            self.dip_scale = 1.0;
        }
        if !(self.friction.is_finite() && self.friction > 0.0) {
            tracing::warn!(friction = self.friction, "invalid friction, using default");
            self.friction = DEFAULT_FRICTION;
        }
        if !(self.max_fling_velocity.is_finite() && self.max_fling_velocity > 0.0) {
            self.max_fling_velocity = Self::default().max_fling_velocity;
        }
        self.fling_velocity_threshold = if self.fling_velocity_threshold.is_finite() {
            self.fling_velocity_threshold.abs()
        } else {
            Self::default().fling_velocity_threshold
        };
        self
    }
}
