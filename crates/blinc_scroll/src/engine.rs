//! Gesture, frame and scrollbar entry points of the scroll tree
//!
//! These operations may touch more than one scrollable: drag deltas and fling
//! frames are negotiated with nested ancestors, and scrollbar proxies fan a
//! drag out to every bound scrollable.

use blinc_animation::FrameDriven;
use smallvec::SmallVec;

use crate::animator::AnimationKind;
use crate::axis::near_zero;
use crate::nested::{NestedState, ScrollResult};
use crate::pattern::ScrollablePattern;
use crate::scrollbar::bar_delta_to_offset;
use crate::source::ScrollSource;
use crate::tree::{ScrollBarProxyId, ScrollTree, ScrollableId};

impl ScrollTree<ScrollablePattern> {
    // =========================================================================
    // Gestures
    // =========================================================================

    /// Entry point for continuous scroll input.
    ///
    /// `offset` is a signed offset delta. A `Start` source opens a gesture
    /// and is always accepted. Other deltas are rejected when the axis is
    /// `None` or a programmatic animation is running.
    pub fn on_scroll_callback(&mut self, id: ScrollableId, offset: f32, source: ScrollSource) -> bool {
        let Some(pattern) = self.get_mut(id) else {
            return false;
        };
        if pattern.axis().is_none() {
            return false;
        }

        if source == ScrollSource::Start {
            pattern.begin_gesture();
            self.release_snap_owner(id);
            self.on_scroll_start_recursive(id);
            return true;
        }

        if pattern.is_programmatic_animation_running() {
            return false;
        }
        if !offset.is_finite() {
            tracing::warn!(offset, "non-finite scroll delta ignored");
            return false;
        }

        let offset = pattern.correct_frame_delta(offset, source);
        self.handle_scroll(id, offset, source, NestedState::Gesture);
        true
    }

    /// The gesture on `id` ended with `velocity` (offset units per second)
    pub fn on_scroll_end(&mut self, id: ScrollableId, velocity: f32) {
        let snap_allowed = self
            .proxy_of(id)
            .and_then(|proxy| self.scroll_bar_proxy(proxy))
            .map_or(true, |proxy| proxy.can_snap(id));

        let Some(pattern) = self.get_mut(id) else {
            return;
        };
        let snapped = pattern.end_gesture(velocity, snap_allowed);
        if snapped {
            if let Some(proxy) = self.proxy_of(id).and_then(|p| self.scroll_bar_proxy_mut(p)) {
                proxy.snap_owner = Some(id);
            }
        }
        self.on_scroll_end_recursive(id, velocity);
    }

    /// Pointer down on `id`
    pub fn on_touch_down(&mut self, id: ScrollableId) {
        if let Some(pattern) = self.get_mut(id) {
            pattern.on_touch_down();
        }
    }

    /// Drag started; the input layer's view of [`on_scroll_callback`] with
    /// the `Start` source
    ///
    /// [`on_scroll_callback`]: ScrollTree::on_scroll_callback
    pub fn handle_drag_start(&mut self, id: ScrollableId) -> bool {
        self.on_scroll_callback(id, 0.0, ScrollSource::Start)
    }

    /// Drag moved by `main_delta` pixels along the axis (positive down or
    /// right). Reverse axes are handled here.
    pub fn handle_drag_update(&mut self, id: ScrollableId, main_delta: f32) -> bool {
        let Some(pattern) = self.get(id) else {
            return false;
        };
        let offset = pattern.gesture_to_offset(main_delta);
        self.on_scroll_callback(id, offset, ScrollSource::Update)
    }

    /// Drag released with `main_velocity` pixels per second along the axis
    pub fn handle_drag_end(&mut self, id: ScrollableId, main_velocity: f32) {
        let Some(pattern) = self.get(id) else {
            return;
        };
        let velocity = pattern.gesture_to_offset(main_velocity);
        self.on_scroll_end(id, velocity);
    }

    /// Mouse wheel or axis event; a self-contained gesture with `Axis` source
    pub fn handle_axis_scroll(&mut self, id: ScrollableId, main_delta: f32) -> bool {
        let Some(pattern) = self.get(id) else {
            return false;
        };
        let offset = pattern.gesture_to_offset(main_delta);
        if !self.on_scroll_callback(id, 0.0, ScrollSource::Start) {
            return false;
        }
        let accepted = self.on_scroll_callback(id, offset, ScrollSource::Axis);
        self.on_scroll_end(id, 0.0);
        accepted
    }

    // =========================================================================
    // Scrollbar
    // =========================================================================

    pub fn on_scroll_bar_drag_start(&mut self, id: ScrollableId) -> bool {
        if !self.on_scroll_callback(id, 0.0, ScrollSource::Start) {
            return false;
        }
        if let Some(pattern) = self.get_mut(id) {
            pattern.scroll_bar_mut().on_drag_start();
        }
        true
    }

    /// The thumb of `id`'s own scrollbar moved by `bar_delta` pixels
    pub fn on_scroll_bar_drag(&mut self, id: ScrollableId, bar_delta: f32) -> bool {
        let Some(pattern) = self.get(id) else {
            return false;
        };
        let offset = pattern
            .scroll_bar()
            .bar_delta_to_offset(bar_delta, pattern.scrollable_distance());
        self.on_scroll_callback(id, offset, ScrollSource::Bar)
    }

    /// Thumb released with `bar_velocity` pixels per second
    pub fn on_scroll_bar_drag_end(&mut self, id: ScrollableId, bar_velocity: f32) {
        let Some(pattern) = self.get_mut(id) else {
            return;
        };
        pattern.scroll_bar_mut().on_drag_end();
        let velocity = pattern
            .scroll_bar()
            .bar_delta_to_offset(bar_velocity, pattern.scrollable_distance());
        self.on_scroll_end(id, velocity);
    }

    /// Clear the proxy's snap flag if `id` holds it
    fn release_snap_owner(&mut self, id: ScrollableId) {
        if let Some(proxy) = self.proxy_of(id).and_then(|p| self.scroll_bar_proxy_mut(p)) {
            if proxy.snap_owner == Some(id) {
                proxy.snap_owner = None;
            }
        }
    }

    fn proxy_members(&self, proxy: ScrollBarProxyId) -> SmallVec<[ScrollableId; 4]> {
        self.scroll_bar_proxy(proxy)
            .map(|p| p.scrollables().iter().copied().collect())
            .unwrap_or_default()
    }

    /// An external scrollbar drag started
    pub fn notify_scroll_bar_drag_start(&mut self, proxy: ScrollBarProxyId) {
        for id in self.proxy_members(proxy) {
            self.on_scroll_callback(id, 0.0, ScrollSource::Start);
        }
    }

    /// The external thumb moved by `bar_delta`. Each bound scrollable moves
    /// by the share of its own scrollable distance.
    pub fn notify_scroll_bar_drag(&mut self, proxy: ScrollBarProxyId, bar_delta: f32) {
        let Some(travel) = self.scroll_bar_proxy(proxy).map(|p| p.thumb_travel()) else {
            return;
        };
        for id in self.proxy_members(proxy) {
            let Some(pattern) = self.get(id) else {
                continue;
            };
            let offset = bar_delta_to_offset(bar_delta, travel, pattern.scrollable_distance());
            self.on_scroll_callback(id, offset, ScrollSource::Bar);
        }
    }

    pub fn notify_scroll_bar_drag_end(&mut self, proxy: ScrollBarProxyId, bar_velocity: f32) {
        let Some(travel) = self.scroll_bar_proxy(proxy).map(|p| p.thumb_travel()) else {
            return;
        };
        for id in self.proxy_members(proxy) {
            let Some(pattern) = self.get(id) else {
                continue;
            };
            let velocity = bar_delta_to_offset(bar_velocity, travel, pattern.scrollable_distance());
            self.on_scroll_end(id, velocity);
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance every scrollable by `dt` seconds. Returns true while any of
    /// them needs another frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        let ids: SmallVec<[ScrollableId; 16]> = self.ids().collect();
        let mut active = false;
        for id in ids {
            active |= self.tick_scrollable(id, dt);
        }
        active
    }

    fn tick_scrollable(&mut self, id: ScrollableId, dt: f32) -> bool {
        let Some(pattern) = self.get_mut(id) else {
            return false;
        };
        pattern.clear_scroll_abort();
        let bar_active = pattern.scroll_bar_mut().tick(dt);
        let Some(frame) = pattern.animator.step(dt) else {
            return bar_active;
        };

        if frame.kind == AnimationKind::Fling {
            let delta = pattern.correct_frame_delta(frame.delta, frame.source);
            let result = if near_zero(delta) {
                ScrollResult::default()
            } else {
                self.handle_scroll(id, delta, frame.source, NestedState::Gesture)
            };
            let Some(pattern) = self.get_mut(id) else {
                return false;
            };
            if !frame.finished {
                if pattern.settle_overscroll(frame.velocity) {
                    tracing::debug!(?id, "fling ran into overscroll");
                } else if !near_zero(result.remain) || pattern.is_pinned_against(delta) {
                    tracing::debug!(?id, remain = result.remain, "fling stopped at boundary");
                    pattern.animator.stop();
                }
            }
        } else {
            let delta = frame.value - pattern.current_offset();
            if !near_zero(delta) {
                pattern.update_current_offset(delta, frame.source);
            }
        }

        let Some(pattern) = self.get_mut(id) else {
            return false;
        };
        if pattern.is_animating() {
            return true;
        }
        if pattern.settle_overscroll(0.0) {
            return true;
        }
        if frame.kind == AnimationKind::Snap {
            self.release_snap_owner(id);
        }
        if let Some(pattern) = self.get_mut(id) {
            pattern.on_animate_stop();
        }
        bar_active
    }
}

impl FrameDriven for ScrollTree<ScrollablePattern> {
    fn tick(&mut self, dt: f32) -> bool {
        Self::tick(self, dt)
    }
}
