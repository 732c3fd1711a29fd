//! Nested scroll coordination
//!
//! When scrollables along the same axis are nested, a delta is negotiated
//! between a scrollable and its nested ancestors. Each scrollable declares a
//! [`NestedScrollMode`] per travel direction:
//!
//! | Mode          | Who consumes first                                   |
//! |---------------|------------------------------------------------------|
//! | `SelfOnly`    | self; the parent is never asked                      |
//! | `SelfFirst`   | self, the part beyond its boundary goes to the parent |
//! | `ParentFirst` | parent, self takes what the parent leaves            |
//! | `Parallel`    | both, independently                                  |
//!
//! Forward means the offset moves toward the content end (negative delta),
//! whatever the gesture direction.

use crate::axis::near_zero;
use crate::scrollable::Scrollable;
use crate::source::ScrollSource;
use crate::tree::{ScrollTree, ScrollableId};

/// How a delta is shared with the nested parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NestedScrollMode {
    SelfOnly,
    #[default]
    SelfFirst,
    ParentFirst,
    Parallel,
}

/// Nested mode per travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedScrollOptions {
    /// Toward the content end
    pub forward: NestedScrollMode,
    /// Toward the content start
    pub backward: NestedScrollMode,
}

impl NestedScrollOptions {
    pub fn new(forward: NestedScrollMode, backward: NestedScrollMode) -> Self {
        Self { forward, backward }
    }

    /// Same mode in both directions
    pub fn uniform(mode: NestedScrollMode) -> Self {
        Self::new(mode, mode)
    }

    /// Mode for a signed offset delta
    pub fn mode_for(&self, delta: f32) -> NestedScrollMode {
        if delta < 0.0 {
            self.forward
        } else {
            self.backward
        }
    }
}

/// Whether a delta comes straight from a gesture or was handed up by a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedState {
    Gesture,
    ChildScroll,
}

/// Outcome of offering a delta to a scrollable and its ancestors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollResult {
    /// Part nobody consumed
    pub remain: f32,
    /// A boundary was hit along the way
    pub reached_edge: bool,
}

impl ScrollResult {
    fn consumed() -> Self {
        Self::default()
    }

    fn unconsumed(remain: f32) -> Self {
        Self {
            remain,
            reached_edge: true,
        }
    }
}

impl<S: Scrollable> ScrollTree<S> {
    /// Offer `offset` to `id`, negotiating with its nested ancestors.
    pub fn handle_scroll(
        &mut self,
        id: ScrollableId,
        offset: f32,
        source: ScrollSource,
        state: NestedState,
    ) -> ScrollResult {
        let Some(scrollable) = self.get(id) else {
            return ScrollResult::unconsumed(offset);
        };
        if scrollable.axis().is_none() {
            return ScrollResult::unconsumed(offset);
        }
        if near_zero(offset) {
            return ScrollResult::consumed();
        }

        let mode = scrollable.nested_scroll().mode_for(offset);
        let Some(parent) = self.nested_parent(id) else {
            return self.scroll_self_only(id, offset, source, state);
        };

        match mode {
            NestedScrollMode::SelfOnly => self.scroll_self_only(id, offset, source, state),
            NestedScrollMode::SelfFirst => self.scroll_self_first(id, parent, offset, source, state),
            NestedScrollMode::ParentFirst => {
                self.scroll_parent_first(id, parent, offset, source, state)
            }
            NestedScrollMode::Parallel => self.scroll_parallel(id, parent, offset, source, state),
        }
    }

    fn scroll_self_only(
        &mut self,
        id: ScrollableId,
        offset: f32,
        source: ScrollSource,
        state: NestedState,
    ) -> ScrollResult {
        let Some(scrollable) = self.get_mut(id) else {
            return ScrollResult::unconsumed(offset);
        };
        let over = scrollable.over_scroll_offset(offset).toward(offset);
        let allow_over = state == NestedState::Gesture && scrollable.can_over_scroll(source);
        let local = if allow_over { offset } else { offset - over };
        if !near_zero(local) {
            scrollable.scroll_by_delta(local, source);
        }
        ScrollResult {
            remain: offset - local,
            reached_edge: !near_zero(over),
        }
    }

    fn scroll_self_first(
        &mut self,
        id: ScrollableId,
        parent: ScrollableId,
        offset: f32,
        source: ScrollSource,
        state: NestedState,
    ) -> ScrollResult {
        let Some(scrollable) = self.get_mut(id) else {
            return ScrollResult::unconsumed(offset);
        };
        let over = scrollable.over_scroll_offset(offset).toward(offset);
        let local = offset - over;
        if !near_zero(local) {
            scrollable.scroll_by_delta(local, source);
        }
        if near_zero(over) {
            return ScrollResult::consumed();
        }

        tracing::debug!(?id, ?parent, over, "nested hand-off to parent");
        let result = self.handle_scroll(parent, over, source, NestedState::ChildScroll);
        if near_zero(result.remain) {
            return result;
        }

        match self.get_mut(id) {
            Some(scrollable)
                if state == NestedState::Gesture && scrollable.can_over_scroll(source) =>
            {
                scrollable.scroll_by_delta(result.remain, source);
                ScrollResult {
                    remain: 0.0,
                    reached_edge: true,
                }
            }
            _ => ScrollResult::unconsumed(result.remain),
        }
    }

    fn scroll_parent_first(
        &mut self,
        id: ScrollableId,
        parent: ScrollableId,
        offset: f32,
        source: ScrollSource,
        state: NestedState,
    ) -> ScrollResult {
        let result = self.handle_scroll(parent, offset, source, NestedState::ChildScroll);
        if near_zero(result.remain) {
            return result;
        }
        self.scroll_self_only(id, result.remain, source, state)
    }

    fn scroll_parallel(
        &mut self,
        id: ScrollableId,
        parent: ScrollableId,
        offset: f32,
        source: ScrollSource,
        state: NestedState,
    ) -> ScrollResult {
        let local = self.scroll_self_only(id, offset, source, state);
        let parent_result = self.handle_scroll(parent, offset, source, NestedState::ChildScroll);
        ScrollResult {
            remain: 0.0,
            reached_edge: local.reached_edge || parent_result.reached_edge,
        }
    }
}
