//! The capability interface the nested coordinator works against

use crate::axis::Axis;
use crate::nested::NestedScrollOptions;
use crate::offset::OverScrollOffset;
use crate::source::ScrollSource;

/// A node of the scroll tree as seen by the nested-scroll coordinator.
///
/// [`ScrollablePattern`](crate::pattern::ScrollablePattern) is the engine's
/// implementation; tests plug in lightweight recorders.
pub trait Scrollable {
    fn axis(&self) -> Axis;

    fn nested_scroll(&self) -> NestedScrollOptions;

    /// Split a prospective delta into the parts beyond each boundary
    fn over_scroll_offset(&self, delta: f32) -> OverScrollOffset;

    /// Whether a delta from `source` may push this scrollable past its bounds
    fn can_over_scroll(&self, source: ScrollSource) -> bool;

    /// Apply `delta` locally. Returns false if nothing moved.
    fn scroll_by_delta(&mut self, delta: f32, source: ScrollSource) -> bool;

    fn is_at_start(&self) -> bool;

    fn is_at_end(&self) -> bool;

    /// A descendant started a gesture that may reach this scrollable
    fn on_scroll_start_recursive(&mut self) {}

    /// The descendant's gesture ended with `velocity`
    fn on_scroll_end_recursive(&mut self, _velocity: f32) {}
}
