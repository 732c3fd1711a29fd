//! Outbound scroll callbacks

use crate::axis::ScrollEdge;
use crate::source::ScrollState;

/// `onScroll(dx, dy)`: amount scrolled this frame, positive toward the end
pub type OnScroll = Box<dyn FnMut(f32, f32)>;
/// `onScrollEdge(edge)`: a boundary was reached
pub type OnScrollEdge = Box<dyn FnMut(ScrollEdge)>;
/// `onScrollStart()` / `onScrollStop()`
pub type OnScrollLifecycle = Box<dyn FnMut()>;
/// `onScrollFrameBegin(offset, state) -> corrected offset`
pub type OnScrollFrameBegin = Box<dyn FnMut(f32, ScrollState) -> ScrollFrameResult>;
/// One-shot listener fired by the next offset update
pub type ScrollingListener = Box<dyn FnOnce()>;

/// Value returned from `onScrollFrameBegin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrameResult {
    /// Delta to apply instead of the pending one
    pub offset: f32,
}

/// Registered callbacks of one scrollable. Every slot is optional.
#[derive(Default)]
pub struct ScrollEvents {
    pub(crate) on_scroll: Option<OnScroll>,
    pub(crate) on_scroll_edge: Option<OnScrollEdge>,
    pub(crate) on_scroll_start: Option<OnScrollLifecycle>,
    pub(crate) on_scroll_stop: Option<OnScrollLifecycle>,
    pub(crate) on_scroll_frame_begin: Option<OnScrollFrameBegin>,
    pub(crate) scrolling_listeners: Vec<ScrollingListener>,
}

impl ScrollEvents {
    pub(crate) fn fire_scroll(&mut self, dx: f32, dy: f32) {
        if let Some(cb) = self.on_scroll.as_mut() {
            cb(dx, dy);
        }
    }

    pub(crate) fn fire_scroll_edge(&mut self, edge: ScrollEdge) {
        tracing::debug!(?edge, "scroll edge reached");
        if let Some(cb) = self.on_scroll_edge.as_mut() {
            cb(edge);
        }
    }

    pub(crate) fn fire_scroll_start(&mut self) {
        if let Some(cb) = self.on_scroll_start.as_mut() {
            cb();
        }
    }

    pub(crate) fn fire_scroll_stop(&mut self) {
        if let Some(cb) = self.on_scroll_stop.as_mut() {
            cb();
        }
    }

    /// Let the frame-begin hook rewrite a pending delta
    pub(crate) fn frame_begin(&mut self, offset: f32, state: ScrollState) -> f32 {
        match self.on_scroll_frame_begin.as_mut() {
            Some(cb) => {
                let corrected = cb(offset, state).offset;
                if corrected.is_finite() {
                    corrected
                } else {
                    tracing::warn!(corrected, "non-finite frame-begin offset ignored");
                    offset
                }
            }
            None => offset,
        }
    }

    pub(crate) fn fire_and_clean_scrolling_listeners(&mut self) {
        for listener in self.scrolling_listeners.drain(..) {
            listener();
        }
    }
}

impl std::fmt::Debug for ScrollEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEvents")
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_scroll_edge", &self.on_scroll_edge.is_some())
            .field("on_scroll_start", &self.on_scroll_start.is_some())
            .field("on_scroll_stop", &self.on_scroll_stop.is_some())
            .field("on_scroll_frame_begin", &self.on_scroll_frame_begin.is_some())
            .field("scrolling_listeners", &self.scrolling_listeners.len())
            .finish()
    }
}
