//! Scrollable pattern: the engine behind one scrollable container
//!
//! Owns the offset state, the snap offsets, the edge effect, the scrollbar
//! model and the single animation slot of a scrollable. Everything that only
//! concerns this one scrollable lives here; gestures and frames that may
//! involve nested ancestors or a shared scrollbar go through
//! [`ScrollTree`](crate::tree::ScrollTree).
//!
//! # Offsets and positions
//!
//! Internally the offset is signed: 0 at the content start, growing negative
//! toward `-scrollable_distance`. Public commands take *positions*, the
//! distance scrolled from the start (`position = -offset`).

use blinc_animation::friction::DEFAULT_STOP_VELOCITY;
use blinc_animation::{predict_fling_distance, Curve, FrictionMotion, Spring, TimedMotion};

use crate::animator::{AnimationKind, ScrollAnimator, ScrollMotion};
use crate::axis::{near_equal, near_zero, Axis, ScrollEdge, Size};
use crate::config::ScrollConfig;
use crate::edge::{
    detect_boundary_crossing, handle_edge_effect, BoundaryCrossing, EdgeEffect, EdgeEffectHost,
    EdgeEffectKind, EdgeHostSnapshot,
};
use crate::error::{Result, ScrollError};
use crate::events::{ScrollEvents, ScrollFrameResult};
use crate::nested::NestedScrollOptions;
use crate::offset::{OverScrollOffset, ScrollOffsetState};
use crate::scrollable::Scrollable;
use crate::scrollbar::ScrollBar;
use crate::snap::{ScrollSnapOptions, SnapOffsets};
use crate::source::{ScrollSource, ScrollState};

/// Duration (seconds) of non-smooth programmatic animations started by
/// `scroll_by` and `scroll_page`
pub const DEFAULT_SCROLL_DURATION: f32 = 0.3;

/// How a programmatic scroll is animated
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnimationOptions {
    /// Seconds; ignored when `smooth` is set
    pub duration: f32,
    pub curve: Curve,
    /// Drive the scroll with the snap spring instead of a timed curve
    pub smooth: bool,
}

impl Default for ScrollAnimationOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SCROLL_DURATION,
            curve: Curve::EaseInOut,
            smooth: false,
        }
    }
}

impl ScrollAnimationOptions {
    pub fn smooth() -> Self {
        Self {
            smooth: true,
            ..Default::default()
        }
    }

    pub fn timed(duration: f32, curve: Curve) -> Self {
        Self {
            duration,
            curve,
            smooth: false,
        }
    }
}

/// Engine state of one scrollable
pub struct ScrollablePattern {
    config: ScrollConfig,
    offset: ScrollOffsetState,
    viewport: Size,
    content: Size,
    source: ScrollSource,
    edge_effect: Box<dyn EdgeEffect>,
    snap_offsets: SnapOffsets,
    pub(crate) animator: ScrollAnimator,
    scroll_bar: ScrollBar,
    pub(crate) events: ScrollEvents,
    dragging: bool,
    nested_scrolling: bool,
    /// Set when an animation was cut short by a new gesture or command;
    /// suppresses `onScrollStop` until the next frame
    scroll_abort: bool,
    layout_dirty: bool,
    pending_restore: Option<f32>,
}

impl ScrollablePattern {
    pub fn new(config: ScrollConfig) -> Self {
        let config = config.normalized();
        Self {
            edge_effect: config.edge_effect.create(config.bounce_spring),
            scroll_bar: ScrollBar::new(config.scrollbar),
            config,
            offset: ScrollOffsetState::default(),
            viewport: Size::default(),
            content: Size::default(),
            source: ScrollSource::None,
            snap_offsets: SnapOffsets::default(),
            animator: ScrollAnimator::new(),
            events: ScrollEvents::default(),
            dragging: false,
            nested_scrolling: false,
            scroll_abort: false,
            layout_dirty: false,
            pending_restore: None,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn axis(&self) -> Axis {
        self.config.axis
    }

    pub fn is_reverse(&self) -> bool {
        self.config.reverse
    }

    /// Signed offset, 0 at the start and negative past it
    pub fn current_offset(&self) -> f32 {
        self.offset.current()
    }

    /// Distance scrolled from the start
    pub fn position(&self) -> f32 {
        -self.offset.current()
    }

    pub fn offset_state(&self) -> &ScrollOffsetState {
        &self.offset
    }

    pub fn scrollable_distance(&self) -> f32 {
        self.offset.scrollable_distance()
    }

    pub fn viewport_length(&self) -> f32 {
        self.config.axis.main_size(self.viewport)
    }

    pub fn content_length(&self) -> f32 {
        self.config.axis.main_size(self.content)
    }

    /// Source of the most recent offset change
    pub fn scroll_source(&self) -> ScrollSource {
        self.source
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState::derive(self.dragging || self.nested_scrolling, self.animator.is_running())
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn animation_kind(&self) -> Option<AnimationKind> {
        self.animator.kind()
    }

    /// Whether an animation started through a command is running
    pub fn is_programmatic_animation_running(&self) -> bool {
        self.animator.is_running_kind(AnimationKind::Programmatic)
    }

    pub fn is_at_start(&self) -> bool {
        self.offset.is_at_start()
    }

    pub fn is_at_end(&self) -> bool {
        self.offset.is_at_end()
    }

    pub fn is_out_of_boundary(&self) -> bool {
        self.offset.is_out_of_boundary()
    }

    pub fn is_scroll_abort(&self) -> bool {
        self.scroll_abort
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Read and clear the layout-dirty flag
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }

    pub fn snap_offsets(&self) -> &[f32] {
        self.snap_offsets.as_slice()
    }

    pub fn edge_effect(&self) -> &dyn EdgeEffect {
        self.edge_effect.as_ref()
    }

    pub fn scroll_bar(&self) -> &ScrollBar {
        &self.scroll_bar
    }

    pub(crate) fn scroll_bar_mut(&mut self) -> &mut ScrollBar {
        &mut self.scroll_bar
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Change the axis. The offset resets and running animations stop.
    pub fn set_axis(&mut self, axis: Axis) {
        if axis == self.config.axis {
            return;
        }
        self.stop_animate();
        self.config.axis = axis;
        self.offset = ScrollOffsetState::default();
        self.refresh_layout();
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.config.reverse = reverse;
    }

    pub fn set_edge_effect(&mut self, kind: EdgeEffectKind) {
        self.config.edge_effect = kind;
        self.edge_effect = kind.create(self.config.bounce_spring);
    }

    /// Install an edge effect implemented outside this crate
    pub fn set_custom_edge_effect(&mut self, effect: Box<dyn EdgeEffect>) {
        self.config.edge_effect = effect.kind();
        self.edge_effect = effect;
    }

    pub fn set_nested_scroll(&mut self, options: NestedScrollOptions) {
        self.config.nested_scroll = options;
    }

    pub fn set_snap(&mut self, snap: Option<ScrollSnapOptions>) {
        self.config.snap = snap;
        self.rebuild_snap_offsets();
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.config.friction = friction;
        self.config = self.config.clone().normalized();
    }

    pub fn set_on_scroll(&mut self, callback: impl FnMut(f32, f32) + 'static) {
        self.events.on_scroll = Some(Box::new(callback));
    }

    pub fn set_on_scroll_edge(&mut self, callback: impl FnMut(ScrollEdge) + 'static) {
        self.events.on_scroll_edge = Some(Box::new(callback));
    }

    pub fn set_on_scroll_start(&mut self, callback: impl FnMut() + 'static) {
        self.events.on_scroll_start = Some(Box::new(callback));
    }

    pub fn set_on_scroll_stop(&mut self, callback: impl FnMut() + 'static) {
        self.events.on_scroll_stop = Some(Box::new(callback));
    }

    pub fn set_on_scroll_frame_begin(
        &mut self,
        callback: impl FnMut(f32, ScrollState) -> ScrollFrameResult + 'static,
    ) {
        self.events.on_scroll_frame_begin = Some(Box::new(callback));
    }

    /// Register a listener fired once by the next offset update
    pub fn add_scrolling_listener(&mut self, listener: impl FnOnce() + 'static) {
        self.events.scrolling_listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Feed the measured viewport and content sizes
    pub fn update_layout(&mut self, viewport: Size, content: Size) {
        self.viewport = viewport.normalized();
        self.content = content.normalized();
        self.refresh_layout();
    }

    fn refresh_layout(&mut self) {
        let distance = (self.content_length() - self.viewport_length()).max(0.0);
        self.offset.set_scrollable_distance(distance);
        self.rebuild_snap_offsets();

        if let Some(position) = self.pending_restore.take() {
            tracing::debug!(position, "applying restored position");
            self.jump_to_position(position);
        } else if !self.dragging && !self.animator.is_running() && self.offset.is_out_of_boundary() {
            let target = self.offset.clamp_to_bounds(self.offset.current());
            self.update_current_offset(target - self.offset.current(), ScrollSource::Jump);
        }
        self.sync_scroll_bar(self.offset.out_of_boundary_extent());
    }

    fn rebuild_snap_offsets(&mut self) {
        self.snap_offsets = match &self.config.snap {
            Some(options) => SnapOffsets::calculate(
                options,
                self.viewport_length(),
                self.scrollable_distance(),
                self.config.dip_scale,
            ),
            None => SnapOffsets::default(),
        };
    }

    fn sync_scroll_bar(&mut self, out_boundary: f32) {
        let (viewport, content) = (self.viewport_length(), self.content_length());
        self.scroll_bar
            .update_geometry(viewport, content, self.offset.current(), out_boundary);
    }

    // =========================================================================
    // Offset pipeline
    // =========================================================================

    /// Damp a drag that pushes further into overscroll
    pub fn adjust_offset(&self, delta: f32, source: ScrollSource) -> f32 {
        self.offset
            .adjust_offset(delta, source, self.viewport_length())
    }

    /// Apply `delta` to the offset.
    ///
    /// Runs the edge effect, commits the delta, validates the result against
    /// the bounds and fires `onScroll` and `onScrollEdge`. Returns false when
    /// the delta was not applied.
    pub fn update_current_offset(&mut self, delta: f32, source: ScrollSource) -> bool {
        if self.config.axis.is_none() {
            return false;
        }
        if !delta.is_finite() {
            tracing::warn!(delta, "non-finite scroll delta ignored");
            return false;
        }

        self.source = source;
        self.events.fire_and_clean_scrolling_listeners();

        let host = self.edge_host();
        let viewport = self.viewport_length();
        if !handle_edge_effect(self.edge_effect.as_mut(), &host, delta, source, viewport) {
            if self.offset.is_out_of_boundary() {
                self.layout_dirty = true;
            }
            return false;
        }

        let fade = self.edge_effect.kind() == EdgeEffectKind::Fade;
        if fade && source.feeds_fade() {
            let over = self.offset.over_scroll_offset(delta).toward(delta);
            if !near_zero(over) {
                self.edge_effect.handle_overscroll(&host, over, viewport);
            }
        }

        let before = self.offset.current();
        self.offset.apply(delta);
        let restrict = fade || self.edge_effect.is_restrict_boundary();
        let out_boundary = self.offset.validate_offset(source, restrict);
        let applied = self.offset.current() - before;
        tracing::trace!(
            ?source,
            delta,
            from = before,
            to = self.offset.current(),
            distance = self.scrollable_distance(),
            "offset updated"
        );

        self.sync_scroll_bar(out_boundary);
        if !near_zero(applied) {
            self.scroll_bar.on_scroll_activity();
            let (dx, dy) = self.config.axis.to_xy(-applied);
            self.events.fire_scroll(dx, dy);
        }
        self.check_boundary_crossing();
        self.layout_dirty = true;
        true
    }

    fn check_boundary_crossing(&mut self) {
        let crossing = detect_boundary_crossing(
            self.offset.last(),
            self.offset.current(),
            self.offset.end_bound(),
        );
        let edge = match crossing {
            Some(BoundaryCrossing::Start) => self.config.axis.start_edge(self.config.reverse),
            Some(BoundaryCrossing::End) => self.config.axis.end_edge(self.config.reverse),
            None => return,
        };
        self.events.fire_scroll_edge(edge);
    }

    fn edge_host(&self) -> EdgeHostSnapshot {
        EdgeHostSnapshot {
            position: self.current_position(),
            leading: self.leading_edge(),
            trailing: self.trailing_edge(),
        }
    }

    /// Map a main-axis gesture delta or velocity onto the offset direction
    pub fn gesture_to_offset(&self, value: f32) -> f32 {
        if self.config.reverse {
            -value
        } else {
            value
        }
    }

    /// Frame-begin hook for sources that allow correction
    pub(crate) fn correct_frame_delta(&mut self, delta: f32, source: ScrollSource) -> f32 {
        if !source.is_frame_correctable() {
            return delta;
        }
        let state = self.scroll_state();
        self.events.frame_begin(delta, state)
    }

    // =========================================================================
    // Gesture lifecycle
    // =========================================================================

    /// Pointer went down; a running fling or spring is caught
    pub fn on_touch_down(&mut self) {
        if self.animator.is_running() {
            self.stop_animate();
        }
    }

    /// A gesture starts on this scrollable
    ///
    /// A gesture that catches motion already in flight continues that scroll
    /// session, so `onScrollStart` only fires from idle.
    pub(crate) fn begin_gesture(&mut self) {
        let was_idle = self.scroll_state() == ScrollState::Idle;
        self.stop_animate();
        let continues = !was_idle || self.scroll_abort;
        self.source = ScrollSource::Start;
        self.dragging = true;
        tracing::debug!(continues, "scroll gesture start");
        if !continues {
            self.events.fire_scroll_start();
        }
    }

    /// The gesture ended with `velocity` (offset units per second).
    ///
    /// Springs back when overscrolled, then tries to snap, then flings.
    /// Returns true when a snap animation was started.
    pub(crate) fn end_gesture(&mut self, velocity: f32, snap_allowed: bool) -> bool {
        self.dragging = false;
        self.edge_effect.release();
        let velocity = self.clamp_velocity(velocity);
        tracing::debug!(velocity, source = ?self.source, "scroll gesture end");

        if self.offset.is_out_of_boundary() && self.start_spring_back(velocity) {
            return false;
        }

        if snap_allowed && self.source.can_trigger_snap() && self.start_snap(velocity) {
            return true;
        }

        if velocity.abs() > self.config.fling_velocity_threshold {
            let source = if self.source == ScrollSource::Bar {
                ScrollSource::BarFling
            } else {
                ScrollSource::Animation
            };
            self.start_fling(velocity, source);
        } else {
            self.on_animate_stop();
        }
        false
    }

    fn clamp_velocity(&self, velocity: f32) -> f32 {
        if !velocity.is_finite() {
            return 0.0;
        }
        let max = self.config.max_fling_velocity;
        velocity.clamp(-max, max)
    }

    fn start_spring_back(&mut self, velocity: f32) -> bool {
        let host = self.edge_host();
        match self.edge_effect.process_scroll_over(&host, velocity) {
            Some(spring) => {
                self.animator.start(
                    AnimationKind::SpringBack,
                    ScrollSource::AnimationSpring,
                    ScrollMotion::Spring(spring),
                );
                true
            }
            None => false,
        }
    }

    fn start_snap(&mut self, velocity: f32) -> bool {
        if self.snap_offsets.is_empty() {
            return false;
        }
        let current = self.offset.current();
        let predicted = if velocity.abs() > self.config.fling_velocity_threshold {
            predict_fling_distance(self.config.friction, velocity)
        } else {
            0.0
        };
        if self.snap_offsets.need_scroll_snap_to_side(current, predicted) {
            tracing::debug!(current, predicted, "fling crosses a side snap point");
            return false;
        }
        let Some(correction) = self.snap_offsets.predict_snap_offset(current, predicted) else {
            return false;
        };
        if near_zero(correction) {
            return false;
        }

        let target = current + correction;
        tracing::debug!(current, target, "snap landing chosen");
        let spring = Spring::new(self.config.snap_spring, current)
            .with_velocity(velocity)
            .with_target(target);
        self.animator.start(
            AnimationKind::Snap,
            ScrollSource::Animation,
            ScrollMotion::Spring(spring),
        );
        true
    }

    fn start_fling(&mut self, velocity: f32, source: ScrollSource) {
        let motion = FrictionMotion::new(self.config.friction, self.offset.current(), velocity)
            .with_stop_velocity(DEFAULT_STOP_VELOCITY);
        self.animator
            .start(AnimationKind::Fling, source, ScrollMotion::Friction(motion));
    }

    /// Overscroll left behind by a fling frame; converts into a spring-back
    pub(crate) fn settle_overscroll(&mut self, velocity: f32) -> bool {
        self.offset.is_out_of_boundary() && self.start_spring_back(velocity)
    }

    /// Whether a move of `delta` would only push against a boundary this
    /// scrollable cannot overscroll
    pub(crate) fn is_pinned_against(&self, delta: f32) -> bool {
        if self.edge_effect.kind() == EdgeEffectKind::Spring {
            return false;
        }
        (delta > 0.0 && self.offset.is_at_start()) || (delta < 0.0 && self.offset.is_at_end())
    }

    /// All motion ended
    pub(crate) fn on_animate_stop(&mut self) {
        if self.dragging || self.nested_scrolling || self.animator.is_running() {
            return;
        }
        tracing::debug!(offset = self.offset.current(), "scroll stop");
        self.events.fire_scroll_stop();
    }

    pub(crate) fn clear_scroll_abort(&mut self) {
        self.scroll_abort = false;
    }

    // =========================================================================
    // Animation control
    // =========================================================================

    /// Stop the running animation without `onScrollStop`. No-op when idle.
    pub fn stop_animate(&mut self) {
        if self.animator.stop().is_some() {
            self.scroll_abort = true;
        }
    }

    /// Abort any scroll in progress and return to idle.
    ///
    /// Fires `onScrollStop` unless the motion was already cut short by a new
    /// gesture this frame.
    pub fn abort_scroll_animator(&mut self) {
        if self.scroll_state() == ScrollState::Idle {
            return;
        }
        self.animator.stop();
        self.dragging = false;
        self.nested_scrolling = false;
        if !self.scroll_abort {
            tracing::debug!("scroll aborted");
            self.events.fire_scroll_stop();
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn clamp_position(&self, position: f32) -> f32 {
        position.clamp(0.0, self.scrollable_distance())
    }

    /// Jump to `position` without animation. Returns false when nothing moved.
    pub fn jump_to_position(&mut self, position: f32) -> bool {
        if self.config.axis.is_none() || !position.is_finite() {
            return false;
        }
        self.stop_animate();
        let target = -self.clamp_position(position);
        let delta = target - self.offset.current();
        if near_zero(delta) {
            return false;
        }
        self.update_current_offset(delta, ScrollSource::Jump)
    }

    /// Scroll to `position`, animated when `animation` is given
    pub fn scroll_to(&mut self, position: f32, animation: Option<ScrollAnimationOptions>) -> bool {
        match animation {
            Some(options) => {
                self.animate_to(position, options.duration, options.curve, options.smooth)
            }
            None => self.jump_to_position(position),
        }
    }

    /// Scroll by `delta` positions (positive toward the end)
    pub fn scroll_by(&mut self, delta: f32, animation: Option<ScrollAnimationOptions>) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let target = self.position() + delta;
        self.scroll_to(target, animation)
    }

    /// Scroll one viewport toward the end (`next`) or the start
    pub fn scroll_page(&mut self, next: bool, animation: Option<ScrollAnimationOptions>) -> bool {
        let page = self.viewport_length();
        self.scroll_by(if next { page } else { -page }, animation)
    }

    /// Scroll to the content start or end named by `edge`. Edges of the
    /// other axis are ignored.
    pub fn scroll_to_edge(&mut self, edge: ScrollEdge, animation: Option<ScrollAnimationOptions>) -> bool {
        let axis = self.config.axis;
        let position = if edge == axis.start_edge(self.config.reverse) {
            0.0
        } else if edge == axis.end_edge(self.config.reverse) {
            self.scrollable_distance()
        } else {
            return false;
        };
        self.scroll_to(position, animation)
    }

    /// Animate to `position`, replacing any running animation.
    ///
    /// `smooth` drives the move with the snap spring; otherwise it runs for
    /// `duration` seconds along `curve`.
    pub fn animate_to(&mut self, position: f32, duration: f32, curve: Curve, smooth: bool) -> bool {
        if self.config.axis.is_none() || !position.is_finite() {
            return false;
        }
        let was_idle = self.scroll_state() == ScrollState::Idle;
        self.stop_animate();

        let from = self.offset.current();
        let target = -self.clamp_position(position);
        if near_equal(from, target) {
            return true;
        }

        let motion = if smooth {
            ScrollMotion::Spring(Spring::new(self.config.snap_spring, from).with_target(target))
        } else {
            ScrollMotion::Timed(TimedMotion::new(from, target, duration, curve))
        };
        if was_idle {
            self.events.fire_scroll_start();
        }
        self.animator.start(
            AnimationKind::Programmatic,
            ScrollSource::AnimationController,
            motion,
        );
        true
    }

    /// Fling with `velocity` positions per second (positive toward the end)
    pub fn fling(&mut self, velocity: f32) -> bool {
        if self.config.axis.is_none() || !velocity.is_finite() || near_zero(velocity) {
            return false;
        }
        let was_idle = self.scroll_state() == ScrollState::Idle;
        self.stop_animate();
        if was_idle {
            self.events.fire_scroll_start();
        }
        let velocity = self.clamp_velocity(-velocity);
        self.start_fling(velocity, ScrollSource::Animation);
        true
    }

    /// Scroll just enough to reveal the span `[start, end]` given in content
    /// positions
    pub fn scroll_to_focused(&mut self, start: f32, end: f32) -> bool {
        if self.config.axis.is_none() || !start.is_finite() || !end.is_finite() {
            return false;
        }
        let (start, end) = (start.min(end), start.max(end));
        let viewport = self.viewport_length();
        let visible_start = self.position();
        let target = if start < visible_start || end - start > viewport {
            start
        } else if end > visible_start + viewport {
            end - viewport
        } else {
            return false;
        };
        self.stop_animate();
        let target = -self.clamp_position(target);
        let delta = target - self.offset.current();
        if near_zero(delta) {
            return false;
        }
        self.update_current_offset(delta, ScrollSource::FocusJump)
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Current position as a decimal string in density-independent units
    pub fn provide_restore_info(&self) -> String {
        let value = self.position() / self.config.dip_scale;
        // avoid printing "-0" at the start
        format!("{}", if value == 0.0 { 0.0 } else { value })
    }

    /// Restore a position produced by [`provide_restore_info`]. Applied on
    /// the next layout pass.
    ///
    /// [`provide_restore_info`]: ScrollablePattern::provide_restore_info
    pub fn on_restore_info(&mut self, info: &str) -> Result<()> {
        let value: f32 = info
            .trim()
            .parse()
            .map_err(|_| ScrollError::InvalidRestoreInfo(info.to_string()))?;
        if !value.is_finite() {
            return Err(ScrollError::NonFiniteRestoreOffset(value));
        }
        self.pending_restore = Some(value * self.config.dip_scale);
        Ok(())
    }
}

impl Default for ScrollablePattern {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl std::fmt::Debug for ScrollablePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollablePattern")
            .field("axis", &self.config.axis)
            .field("offset", &self.offset)
            .field("source", &self.source)
            .field("state", &self.scroll_state())
            .field("edge_effect", &self.edge_effect)
            .field("animation", &self.animator.kind())
            .finish()
    }
}

impl EdgeEffectHost for ScrollablePattern {
    fn current_position(&self) -> f32 {
        self.offset.current()
    }

    fn leading_edge(&self) -> f32 {
        if self.config.reverse {
            self.offset.end_bound()
        } else {
            0.0
        }
    }

    fn trailing_edge(&self) -> f32 {
        if self.config.reverse {
            0.0
        } else {
            self.offset.end_bound()
        }
    }
}

impl Scrollable for ScrollablePattern {
    fn axis(&self) -> Axis {
        self.config.axis
    }

    fn nested_scroll(&self) -> NestedScrollOptions {
        self.config.nested_scroll
    }

    fn over_scroll_offset(&self, delta: f32) -> OverScrollOffset {
        self.offset.over_scroll_offset(delta)
    }

    fn can_over_scroll(&self, source: ScrollSource) -> bool {
        match self.edge_effect.kind() {
            EdgeEffectKind::Spring => source.allows_spring_overscroll(),
            EdgeEffectKind::Fade => source.feeds_fade(),
            EdgeEffectKind::None => false,
        }
    }

    fn scroll_by_delta(&mut self, delta: f32, source: ScrollSource) -> bool {
        let adjusted = self.adjust_offset(delta, source);
        self.update_current_offset(adjusted, source)
    }

    fn is_at_start(&self) -> bool {
        self.offset.is_at_start()
    }

    fn is_at_end(&self) -> bool {
        self.offset.is_at_end()
    }

    fn on_scroll_start_recursive(&mut self) {
        let was_idle = self.scroll_state() == ScrollState::Idle;
        self.stop_animate();
        self.nested_scrolling = true;
        if was_idle {
            self.events.fire_scroll_start();
        }
    }

    fn on_scroll_end_recursive(&mut self, velocity: f32) {
        self.nested_scrolling = false;
        self.edge_effect.release();
        if self.offset.is_out_of_boundary() && self.start_spring_back(self.clamp_velocity(velocity)) {
            return;
        }
        self.on_animate_stop();
    }
}
