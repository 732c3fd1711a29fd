//! Blinc Scroll Engine
//!
//! Turns drag, fling, scrollbar and programmatic input into a validated
//! content offset for trees of nested scrollable containers.
//!
//! # Features
//!
//! - **Offset validation**: overscroll friction and boundary clamping chosen
//!   per [`ScrollSource`]
//! - **Edge effects**: spring-back, fade glow, or a hard stop
//! - **Snapping**: interval and pagination snap offsets with landing
//!   prediction from release velocity
//! - **Nested scrolling**: per-direction `SelfOnly` / `SelfFirst` /
//!   `ParentFirst` / `Parallel` negotiation between ancestors
//! - **Frame-pushed motion**: [`ScrollTree`] implements
//!   [`FrameDriven`](blinc_animation::FrameDriven); nothing owns a thread
//!
//! # Example
//!
//! ```rust
//! use blinc_scroll::{ScrollConfig, ScrollTree, ScrollablePattern, Size};
//!
//! let mut tree = ScrollTree::new();
//! let list = tree.insert(ScrollablePattern::new(ScrollConfig::vertical()));
//! tree.get_mut(list)
//!     .unwrap()
//!     .update_layout(Size::new(320.0, 480.0), Size::new(320.0, 2000.0));
//!
//! tree.handle_drag_start(list);
//! tree.handle_drag_update(list, -120.0);
//! tree.handle_drag_end(list, -900.0);
//!
//! while tree.tick(1.0 / 60.0) {}
//! assert!(tree.get(list).unwrap().position() > 120.0);
//! ```

pub mod animator;
pub mod axis;
pub mod config;
pub mod controller;
pub mod edge;
mod engine;
pub mod error;
pub mod events;
pub mod nested;
pub mod offset;
pub mod pattern;
pub mod scrollable;
pub mod scrollbar;
pub mod snap;
pub mod source;
pub mod tree;

pub use animator::{AnimationKind, ScrollAnimator};
pub use axis::{Axis, Dimension, ScrollEdge, Size};
pub use config::ScrollConfig;
pub use controller::ScrollController;
pub use edge::{EdgeEffect, EdgeEffectHost, EdgeEffectKind};
pub use error::{Result, ScrollError};
pub use events::ScrollFrameResult;
pub use nested::{NestedScrollMode, NestedScrollOptions, NestedState, ScrollResult};
pub use offset::{OverScrollOffset, ScrollOffsetState};
pub use pattern::{ScrollAnimationOptions, ScrollablePattern};
pub use scrollable::Scrollable;
pub use scrollbar::{ScrollBar, ScrollBarConfig, ScrollBarDisplayMode, ScrollBarProxy};
pub use snap::{ScrollSnapOptions, SnapAlign, SnapMode, SnapOffsets};
pub use source::{ScrollSource, ScrollState};
pub use tree::{ScrollBarProxyId, ScrollTree, ScrollableId};
