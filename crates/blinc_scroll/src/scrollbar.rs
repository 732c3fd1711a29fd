//! Scrollbar binding
//!
//! [`ScrollBar`] is the per-scrollable bar: thumb geometry, visibility
//! state, and conversion of thumb drags into content deltas. Painting is left
//! to the renderer.
//!
//! [`ScrollBarProxy`] binds several scrollables to one external scrollbar.
//! It lives in the [`ScrollTree`](crate::tree::ScrollTree) arena and is
//! addressed by [`ScrollBarProxyId`](crate::tree::ScrollBarProxyId).

use smallvec::SmallVec;

use crate::axis::EPSILON;
use crate::tree::ScrollableId;

/// When the scrollbar is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBarDisplayMode {
    /// Never shown
    Off,
    /// Shown while scrolling, auto-dismissed after inactivity
    #[default]
    Auto,
    /// Always shown
    On,
}

/// Scrollbar interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBarState {
    #[default]
    Idle,
    /// Visible due to scroll activity
    Scrolling,
    /// Thumb is being dragged
    Dragging,
    /// Auto-dismiss in progress
    FadingOut,
}

impl ScrollBarState {
    /// Opacity (0.0 to 1.0) for the renderer
    pub fn opacity(&self) -> f32 {
        match self {
            ScrollBarState::Idle => 0.0,
            ScrollBarState::FadingOut => 0.3,
            ScrollBarState::Scrolling => 0.7,
            ScrollBarState::Dragging => 1.0,
        }
    }
}

/// Scrollbar configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollBarConfig {
    pub display_mode: ScrollBarDisplayMode,
    /// Gap between the track and the viewport edges
    pub edge_padding: f32,
    /// Minimum thumb length in pixels
    pub min_thumb_length: f32,
    /// Seconds of inactivity before an `Auto` bar fades
    pub auto_dismiss_delay: f32,
    /// Seconds the fade-out lasts
    pub fade_duration: f32,
}

impl Default for ScrollBarConfig {
    fn default() -> Self {
        Self {
            display_mode: ScrollBarDisplayMode::Auto,
            edge_padding: 2.0,
            min_thumb_length: 30.0,
            auto_dismiss_delay: 1.5,
            fade_duration: 0.25,
        }
    }
}

/// Per-scrollable scrollbar model
#[derive(Debug, Clone, Default)]
pub struct ScrollBar {
    config: ScrollBarConfig,
    state: ScrollBarState,
    idle_time: f32,
    track_length: f32,
    base_thumb_length: f32,
    thumb_length: f32,
    thumb_offset: f32,
    out_boundary: f32,
    scrollable: bool,
}

impl ScrollBar {
    pub fn new(config: ScrollBarConfig) -> Self {
        Self {
            config,
            state: if config.display_mode == ScrollBarDisplayMode::On {
                ScrollBarState::Scrolling
            } else {
                ScrollBarState::Idle
            },
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ScrollBarConfig {
        &self.config
    }

    pub fn state(&self) -> ScrollBarState {
        self.state
    }

    pub fn opacity(&self) -> f32 {
        match self.config.display_mode {
            ScrollBarDisplayMode::Off => 0.0,
            ScrollBarDisplayMode::On => self.state.opacity().max(ScrollBarState::Scrolling.opacity()),
            ScrollBarDisplayMode::Auto => self.state.opacity(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.scrollable && self.opacity() > 0.0
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    pub fn thumb_length(&self) -> f32 {
        self.thumb_length
    }

    pub fn thumb_offset(&self) -> f32 {
        self.thumb_offset
    }

    /// Overscroll last reported by the validator
    pub fn out_boundary(&self) -> f32 {
        self.out_boundary
    }

    /// Recompute thumb geometry.
    ///
    /// `offset` is the signed scroll offset and `out_boundary` the signed
    /// overscroll extent; the thumb shrinks by the overscroll and stays pinned
    /// to the edge being overscrolled.
    pub fn update_geometry(&mut self, viewport: f32, content: f32, offset: f32, out_boundary: f32) {
        self.track_length = (viewport - 2.0 * self.config.edge_padding).max(0.0);
        self.out_boundary = out_boundary;
        let distance = content - viewport;
        self.scrollable = distance > EPSILON && self.track_length > 0.0;

        if !self.scrollable {
            self.base_thumb_length = self.track_length;
            self.thumb_length = self.track_length;
            self.thumb_offset = 0.0;
            return;
        }

        let min_thumb = self.config.min_thumb_length.min(self.track_length);
        self.base_thumb_length = (self.track_length * viewport / content).max(min_thumb);
        self.thumb_length = (self.base_thumb_length - out_boundary.abs()).max(min_thumb);

        let travel = self.track_length - self.thumb_length;
        self.thumb_offset = if out_boundary > 0.0 {
            0.0
        } else if out_boundary < 0.0 {
            travel
        } else {
            (travel * (-offset / distance)).clamp(0.0, travel)
        };
    }

    /// Convert a thumb movement into a content offset delta
    pub fn bar_delta_to_offset(&self, bar_delta: f32, scrollable_distance: f32) -> f32 {
        bar_delta_to_offset(
            bar_delta,
            self.track_length - self.base_thumb_length,
            scrollable_distance,
        )
    }

    /// Scroll activity shows an `Auto` bar
    pub fn on_scroll_activity(&mut self) {
        self.idle_time = 0.0;
        if matches!(self.state, ScrollBarState::Idle | ScrollBarState::FadingOut) {
            self.state = ScrollBarState::Scrolling;
        }
    }

    pub fn on_drag_start(&mut self) {
        self.idle_time = 0.0;
        self.state = ScrollBarState::Dragging;
    }

    pub fn on_drag_end(&mut self) {
        self.idle_time = 0.0;
        self.state = ScrollBarState::Scrolling;
    }

    /// Advance the auto-dismiss timer. Returns true while a frame is needed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.config.display_mode != ScrollBarDisplayMode::Auto {
            return false;
        }
        match self.state {
            ScrollBarState::Idle | ScrollBarState::Dragging => false,
            ScrollBarState::Scrolling => {
                self.idle_time += dt;
                if self.idle_time >= self.config.auto_dismiss_delay {
                    self.idle_time = 0.0;
                    self.state = ScrollBarState::FadingOut;
                }
                true
            }
            ScrollBarState::FadingOut => {
                self.idle_time += dt;
                if self.idle_time >= self.config.fade_duration {
                    self.idle_time = 0.0;
                    self.state = ScrollBarState::Idle;
                    return false;
                }
                true
            }
        }
    }
}

/// Map thumb travel onto content travel. Thumb down means content forward,
/// i.e. a negative offset delta.
pub fn bar_delta_to_offset(bar_delta: f32, thumb_travel: f32, scrollable_distance: f32) -> f32 {
    if thumb_travel <= EPSILON || scrollable_distance <= 0.0 {
        return 0.0;
    }
    -bar_delta / thumb_travel * scrollable_distance
}

/// An external scrollbar shared by several scrollables
#[derive(Debug, Clone, Default)]
pub struct ScrollBarProxy {
    pub(crate) scrollables: SmallVec<[ScrollableId; 4]>,
    pub(crate) snap_owner: Option<ScrollableId>,
    track_length: f32,
    thumb_length: f32,
}

impl ScrollBarProxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry of the external bar, set by its own layout
    pub fn set_bar_geometry(&mut self, track_length: f32, thumb_length: f32) {
        self.track_length = track_length.max(0.0);
        self.thumb_length = thumb_length.clamp(0.0, self.track_length);
    }

    pub fn thumb_travel(&self) -> f32 {
        self.track_length - self.thumb_length
    }

    pub fn scrollables(&self) -> &[ScrollableId] {
        &self.scrollables
    }

    /// Whether a bound scrollable is running a snap animation
    pub fn is_scroll_snap_trigger(&self) -> bool {
        self.snap_owner.is_some()
    }

    /// Whether `id` may snap: nobody else owns the snap flag
    pub fn can_snap(&self, id: ScrollableId) -> bool {
        self.snap_owner.map_or(true, |owner| owner == id)
    }

    pub(crate) fn register(&mut self, id: ScrollableId) {
        if !self.scrollables.contains(&id) {
            self.scrollables.push(id);
        }
    }

    pub(crate) fn unregister(&mut self, id: ScrollableId) {
        self.scrollables.retain(|s| *s != id);
        if self.snap_owner == Some(id) {
            self.snap_owner = None;
        }
    }
}
