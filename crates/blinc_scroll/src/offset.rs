//! Offset state and validation
//!
//! Offsets are signed distances already scrolled: 0 is the content start and
//! values grow negative as the content moves forward, down to
//! `-scrollable_distance` at the content end. Values above 0 or below the end
//! are overscroll.

use crate::axis::{near_zero, EPSILON};
use crate::source::ScrollSource;

/// Steepness of the overscroll friction curve
pub const OVERSCROLL_FRICTION_RATIO: f32 = 1.848;

/// Friction applied to a drag past a boundary.
///
/// `gamma` is the overscroll depth relative to the viewport; it is clamped to
/// `[0, 1]` so the factor stays within `(0, 1]`.
pub fn overscroll_friction(gamma: f32) -> f32 {
    let gamma = if gamma.is_nan() { 0.0 } else { gamma.clamp(0.0, 1.0) };
    (-OVERSCROLL_FRICTION_RATIO * gamma).exp()
}

/// Portion of a delta that lands beyond each boundary.
///
/// Positive `start` means overscroll past the content start; `end` carries the
/// sign of the delta past the content end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverScrollOffset {
    pub start: f32,
    pub end: f32,
}

impl OverScrollOffset {
    /// The part that lies beyond the boundary the delta moves toward
    pub fn toward(&self, delta: f32) -> f32 {
        if delta > 0.0 {
            self.start
        } else {
            self.end
        }
    }

    /// The part that lies beyond the boundary the delta moves away from
    pub fn away_from(&self, delta: f32) -> f32 {
        if delta > 0.0 {
            self.end
        } else {
            self.start
        }
    }
}

/// Offset bookkeeping for one scrollable
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffsetState {
    current: f32,
    last: f32,
    scrollable_distance: f32,
}

impl ScrollOffsetState {
    pub fn new(scrollable_distance: f32) -> Self {
        let mut state = Self::default();
        state.set_scrollable_distance(scrollable_distance);
        state
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Offset before the most recent change
    pub fn last(&self) -> f32 {
        self.last
    }

    pub fn scrollable_distance(&self) -> f32 {
        self.scrollable_distance
    }

    /// Negative or non-finite distances are treated as 0
    pub fn set_scrollable_distance(&mut self, distance: f32) {
        self.scrollable_distance = if distance.is_finite() && distance > 0.0 {
            distance
        } else {
            if distance < 0.0 || !distance.is_finite() {
                tracing::warn!("scrollable distance {distance} normalized to 0");
            }
            0.0
        };
    }

    /// Offset at the content end
    pub fn end_bound(&self) -> f32 {
        -self.scrollable_distance
    }

    /// Move by `delta`, remembering the previous offset
    pub fn apply(&mut self, delta: f32) {
        self.last = self.current;
        self.current += delta;
    }

    /// Place the offset directly, remembering the previous offset
    pub fn set_current(&mut self, offset: f32) {
        self.last = self.current;
        self.current = offset;
    }

    pub fn clamp_to_bounds(&self, offset: f32) -> f32 {
        offset.clamp(self.end_bound(), 0.0)
    }

    pub fn is_at_start(&self) -> bool {
        self.current >= -EPSILON
    }

    pub fn is_at_end(&self) -> bool {
        self.current <= self.end_bound() + EPSILON
    }

    pub fn is_out_of_boundary(&self) -> bool {
        self.current > EPSILON || self.current < self.end_bound() - EPSILON
    }

    /// Signed overscroll: positive past the start, negative past the end
    pub fn out_of_boundary_extent(&self) -> f32 {
        if self.current > 0.0 {
            self.current
        } else if self.current < self.end_bound() {
            self.current - self.end_bound()
        } else {
            0.0
        }
    }

    pub fn over_scroll_past_start(&self) -> f32 {
        self.current.max(0.0)
    }

    pub fn over_scroll_past_end(&self) -> f32 {
        (self.end_bound() - self.current).max(0.0)
    }

    /// Split a prospective `delta` into the parts beyond each boundary
    pub fn over_scroll_offset(&self, delta: f32) -> OverScrollOffset {
        let mut offset = OverScrollOffset::default();
        let from = self.current;
        let to = from + delta;

        if from > 0.0 && to > 0.0 {
            offset.start = delta;
        } else if from > 0.0 && to <= 0.0 {
            offset.start = -from;
        } else if from <= 0.0 && to > 0.0 {
            offset.start = to;
        }

        let end = self.end_bound();
        if from < end && to < end {
            offset.end = delta;
        } else if from < end && to >= end {
            offset.end = end - from;
        } else if from >= end && to < end {
            offset.end = to - end;
        }
        offset
    }

    /// Damp a drag that pushes further past an already-crossed boundary.
    ///
    /// Deltas heading back toward the legal range pass unchanged, as do
    /// physics-driven sources and deltas while the viewport has no length.
    pub fn adjust_offset(&self, delta: f32, source: ScrollSource, viewport_length: f32) -> f32 {
        if near_zero(delta) || near_zero(viewport_length) || source.is_physics() {
            return delta;
        }

        let past_start = self.over_scroll_past_start();
        let past_end = self.over_scroll_past_end();

        if (past_start > 0.0 && delta < 0.0) || (past_end > 0.0 && delta > 0.0) {
            return delta;
        }

        let over_scroll_past = past_start.max(past_end);
        if over_scroll_past <= 0.0 {
            return delta;
        }

        let magnitude = delta.abs();
        let damped = if magnitude > over_scroll_past {
            // The part beyond the current depth is damped by that depth
            let excess = magnitude - over_scroll_past;
            over_scroll_past + excess * overscroll_friction(over_scroll_past / viewport_length)
        } else {
            let gamma = (over_scroll_past - magnitude) / viewport_length;
            magnitude * overscroll_friction(gamma)
        };
        delta.signum() * damped
    }

    /// Bring the offset back inside `[-scrollable_distance, 0]` when the
    /// source or the edge effect demands it.
    ///
    /// A restrictive edge effect clamps every source. Returns the remaining
    /// out-of-boundary extent, 0 when clamped or inside the bounds.
    pub fn validate_offset(&mut self, source: ScrollSource, restrict_boundary: bool) -> f32 {
        if restrict_boundary || source.requires_restrict() {
            self.current = self.clamp_to_bounds(self.current);
            return 0.0;
        }
        self.out_of_boundary_extent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(current: f32, distance: f32) -> ScrollOffsetState {
        let mut state = ScrollOffsetState::new(distance);
        state.set_current(current);
        state
    }

    #[test]
    fn test_friction_bounds() {
        assert_eq!(overscroll_friction(0.0), 1.0);
        assert!((overscroll_friction(1.0) - (-1.848f32).exp()).abs() < 1e-6);
        assert_eq!(overscroll_friction(5.0), overscroll_friction(1.0));
        assert_eq!(overscroll_friction(-3.0), 1.0);
    }

    #[test]
    fn test_adjust_noop_cases() {
        let state = state_at(40.0, 100.0);
        assert_eq!(state.adjust_offset(0.0, ScrollSource::Update, 500.0), 0.0);
        assert_eq!(state.adjust_offset(10.0, ScrollSource::Update, 0.0), 10.0);
        assert_eq!(state.adjust_offset(10.0, ScrollSource::Animation, 500.0), 10.0);
        assert_eq!(state.adjust_offset(10.0, ScrollSource::AnimationSpring, 500.0), 10.0);
    }

    #[test]
    fn test_adjust_inside_bounds_passes_through() {
        let state = state_at(-50.0, 100.0);
        assert_eq!(state.adjust_offset(20.0, ScrollSource::Update, 500.0), 20.0);
        assert_eq!(state.adjust_offset(-20.0, ScrollSource::Update, 500.0), -20.0);
    }

    #[test]
    fn test_adjust_damps_further_overscroll() {
        let state = state_at(100.0, 300.0);
        let adjusted = state.adjust_offset(10.0, ScrollSource::Update, 500.0);
        assert!(adjusted > 0.0);
        assert!(adjusted < 10.0);
        let expected = 10.0 * (-1.848f32 * 90.0 / 500.0).exp();
        assert!((adjusted - expected).abs() < 1e-4);
    }

    #[test]
    fn test_adjust_damps_large_pulls() {
        let state = state_at(60.0, 300.0);
        let adjusted = state.adjust_offset(200.0, ScrollSource::Update, 400.0);
        let expected = 60.0 + 140.0 * (-1.848f32 * 60.0 / 400.0).exp();
        assert!((adjusted - expected).abs() < 1e-3);
        assert!(adjusted < 200.0);
    }

    #[test]
    fn test_adjust_zero_distance_past_end() {
        let state = state_at(-30.0, 0.0);
        let adjusted = state.adjust_offset(-10.0, ScrollSource::Update, 300.0);
        assert!(adjusted < 0.0 && adjusted > -10.0);
        assert_eq!(state.adjust_offset(10.0, ScrollSource::Update, 300.0), 10.0);
    }

    #[test]
    fn test_adjust_never_damps_return_toward_range() {
        let state = state_at(100.0, 300.0);
        assert_eq!(state.adjust_offset(-10.0, ScrollSource::Update, 500.0), -10.0);

        let state = state_at(-350.0, 300.0);
        assert_eq!(state.adjust_offset(10.0, ScrollSource::Update, 500.0), 10.0);
    }

    #[test]
    fn test_adjust_damps_past_end() {
        let state = state_at(-350.0, 300.0);
        let adjusted = state.adjust_offset(-10.0, ScrollSource::Update, 500.0);
        assert!(adjusted < 0.0 && adjusted > -10.0);
    }

    #[test]
    fn test_over_scroll_offset_split() {
        let state = state_at(0.0, 100.0);
        assert_eq!(state.over_scroll_offset(20.0).start, 20.0);
        assert_eq!(state.over_scroll_offset(-150.0).end, -50.0);
        assert_eq!(state.over_scroll_offset(-30.0), OverScrollOffset::default());

        let state = state_at(30.0, 100.0);
        assert_eq!(state.over_scroll_offset(-50.0).start, -30.0);
        assert_eq!(state.over_scroll_offset(10.0).start, 10.0);
    }

    #[test]
    fn test_validate_clamps_when_restricted() {
        let mut state = state_at(-150.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Update, true), 0.0);
        assert_eq!(state.current(), -100.0);
    }

    #[test]
    fn test_validate_reports_extent_when_unrestricted() {
        let mut state = state_at(25.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Update, false), 25.0);
        assert_eq!(state.current(), 25.0);

        let mut state = state_at(-130.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Update, false), -30.0);
    }

    #[test]
    fn test_validate_bar_always_clamps() {
        let mut state = state_at(25.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Bar, false), 0.0);
        assert_eq!(state.current(), 0.0);
    }

    #[test]
    fn test_validate_jump_passes_through_unrestricted() {
        let mut state = state_at(-180.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Jump, false), -80.0);
        assert_eq!(state.current(), -180.0);
    }

    #[test]
    fn test_validate_jump_clamped_by_restrictive_effect() {
        let mut state = state_at(-180.0, 100.0);
        assert_eq!(state.validate_offset(ScrollSource::Jump, true), 0.0);
        assert_eq!(state.current(), -100.0);

        let mut state = state_at(40.0, 100.0);
        state.validate_offset(ScrollSource::FocusJump, true);
        assert_eq!(state.current(), 0.0);
    }

    #[test]
    fn test_negative_distance_normalized() {
        let state = ScrollOffsetState::new(-40.0);
        assert_eq!(state.scrollable_distance(), 0.0);
        assert!(state.is_at_start() && state.is_at_end());
    }
}
