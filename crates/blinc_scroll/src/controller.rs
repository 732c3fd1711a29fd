//! Scroll controller
//!
//! A handle an application keeps to drive one scrollable from outside. It
//! stores only the id of the bound scrollable; every command resolves it
//! against the tree at call time. Unbound controllers, stale ids and
//! scrollables with `Axis::None` turn commands into no-ops.

use blinc_animation::Curve;

use crate::axis::{Dimension, ScrollEdge};
use crate::pattern::{ScrollAnimationOptions, ScrollablePattern};
use crate::tree::{ScrollTree, ScrollableId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollController {
    bound: Option<ScrollableId>,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `id`, replacing any previous binding
    pub fn bind(&mut self, id: ScrollableId) {
        self.bound = Some(id);
    }

    pub fn unbind(&mut self) {
        self.bound = None;
    }

    pub fn bound(&self) -> Option<ScrollableId> {
        self.bound
    }

    fn pattern<'a>(&self, tree: &'a ScrollTree<ScrollablePattern>) -> Option<&'a ScrollablePattern> {
        tree.get(self.bound?).filter(|p| !p.axis().is_none())
    }

    fn pattern_mut<'a>(
        &self,
        tree: &'a mut ScrollTree<ScrollablePattern>,
    ) -> Option<&'a mut ScrollablePattern> {
        tree.get_mut(self.bound?).filter(|p| !p.axis().is_none())
    }

    /// Resolve `position` to pixels; percentages are of the scrollable
    /// distance
    fn resolve(pattern: &ScrollablePattern, position: Dimension) -> f32 {
        position.to_px(pattern.config().dip_scale, pattern.scrollable_distance())
    }

    /// Scroll to `position`, animated when `animation` is given
    pub fn scroll_to(
        &self,
        tree: &mut ScrollTree<ScrollablePattern>,
        position: Dimension,
        animation: Option<ScrollAnimationOptions>,
    ) -> bool {
        let Some(pattern) = self.pattern_mut(tree) else {
            return false;
        };
        let position = Self::resolve(pattern, position);
        pattern.scroll_to(position, animation)
    }

    pub fn scroll_by(
        &self,
        tree: &mut ScrollTree<ScrollablePattern>,
        delta: Dimension,
        animation: Option<ScrollAnimationOptions>,
    ) -> bool {
        let Some(pattern) = self.pattern_mut(tree) else {
            return false;
        };
        let delta = Self::resolve(pattern, delta);
        pattern.scroll_by(delta, animation)
    }

    pub fn scroll_to_edge(
        &self,
        tree: &mut ScrollTree<ScrollablePattern>,
        edge: ScrollEdge,
        animation: Option<ScrollAnimationOptions>,
    ) -> bool {
        self.pattern_mut(tree)
            .map_or(false, |p| p.scroll_to_edge(edge, animation))
    }

    pub fn scroll_page(
        &self,
        tree: &mut ScrollTree<ScrollablePattern>,
        next: bool,
        animation: Option<ScrollAnimationOptions>,
    ) -> bool {
        self.pattern_mut(tree)
            .map_or(false, |p| p.scroll_page(next, animation))
    }

    /// Jump without animation
    pub fn jump_to(&self, tree: &mut ScrollTree<ScrollablePattern>, position: Dimension) -> bool {
        let Some(pattern) = self.pattern_mut(tree) else {
            return false;
        };
        let position = Self::resolve(pattern, position);
        pattern.jump_to_position(position)
    }

    /// Animate to `position`. Percentages are rejected.
    pub fn animate_to(
        &self,
        tree: &mut ScrollTree<ScrollablePattern>,
        position: Dimension,
        duration: f32,
        curve: Curve,
        smooth: bool,
    ) -> bool {
        if position.is_percent() {
            tracing::warn!(?position, "animate_to does not accept percentages");
            return false;
        }
        let Some(pattern) = self.pattern_mut(tree) else {
            return false;
        };
        let position = Self::resolve(pattern, position);
        pattern.animate_to(position, duration, curve, smooth)
    }

    /// Fling with `velocity` pixels per second, positive toward the end
    pub fn fling(&self, tree: &mut ScrollTree<ScrollablePattern>, velocity: f32) -> bool {
        self.pattern_mut(tree).map_or(false, |p| p.fling(velocity))
    }

    pub fn stop_animate(&self, tree: &mut ScrollTree<ScrollablePattern>) {
        if let Some(pattern) = self.pattern_mut(tree) {
            pattern.stop_animate();
        }
    }

    /// Distance scrolled from the start; 0 when unbound
    pub fn current_offset(&self, tree: &ScrollTree<ScrollablePattern>) -> f32 {
        self.pattern(tree).map_or(0.0, |p| p.position())
    }

    pub fn is_at_end(&self, tree: &ScrollTree<ScrollablePattern>) -> bool {
        self.pattern(tree).map_or(false, |p| p.is_at_end())
    }

    pub fn is_at_start(&self, tree: &ScrollTree<ScrollablePattern>) -> bool {
        self.pattern(tree).map_or(false, |p| p.is_at_start())
    }
}
