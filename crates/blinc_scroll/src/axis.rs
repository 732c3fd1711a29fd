//! Axis, sizes, edges and length units

/// Tolerance used for offset comparisons
pub const EPSILON: f32 = 0.001;

#[inline]
pub fn near_zero(value: f32) -> bool {
    value.abs() < EPSILON
}

#[inline]
pub fn near_equal(a: f32, b: f32) -> bool {
    near_zero(a - b)
}

/// Direction along which a scrollable moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Scrolling disabled
    None,
    Horizontal,
    /// Vertical scrolling (default)
    #[default]
    Vertical,
}

impl Axis {
    pub fn is_none(&self) -> bool {
        matches!(self, Axis::None)
    }

    /// Pick the component of `size` along this axis (0 for `None`)
    pub fn main_size(&self, size: Size) -> f32 {
        match self {
            Axis::None => 0.0,
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Pick the component of an `(x, y)` pair along this axis
    pub fn main_of(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::None => 0.0,
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    /// Spread a main-axis value back into an `(x, y)` pair
    pub fn to_xy(&self, main: f32) -> (f32, f32) {
        match self {
            Axis::None => (0.0, 0.0),
            Axis::Horizontal => (main, 0.0),
            Axis::Vertical => (0.0, main),
        }
    }

    /// Edge name for the content-start boundary
    pub fn start_edge(&self, reverse: bool) -> ScrollEdge {
        match (self, reverse) {
            (Axis::Horizontal, false) => ScrollEdge::Left,
            (Axis::Horizontal, true) => ScrollEdge::Right,
            (_, false) => ScrollEdge::Top,
            (_, true) => ScrollEdge::Bottom,
        }
    }

    /// Edge name for the content-end boundary
    pub fn end_edge(&self, reverse: bool) -> ScrollEdge {
        self.start_edge(!reverse)
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite extents become 0
    pub fn normalized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

/// A named visual edge of a scrollable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl ScrollEdge {
    /// Whether the edge lies at the visual start (top/left) of the axis
    pub fn is_visual_start(&self) -> bool {
        matches!(self, ScrollEdge::Top | ScrollEdge::Left)
    }
}

/// A length that may be relative to something else
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// Physical pixels
    Px(f32),
    /// Density-independent units, scaled by the display's pixel ratio
    Vp(f32),
    /// Fraction (0.0 to 1.0) of a context-dependent basis
    Percent(f32),
}

impl Dimension {
    pub fn is_percent(&self) -> bool {
        matches!(self, Dimension::Percent(_))
    }

    /// Resolve to pixels. Non-finite values resolve to 0.
    pub fn to_px(&self, dip_scale: f32, percent_basis: f32) -> f32 {
        let px = match *self {
            Dimension::Px(v) => v,
            Dimension::Vp(v) => v * dip_scale,
            Dimension::Percent(v) => v * percent_basis,
        };
        if px.is_finite() {
            px
        } else {
            0.0
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(0.0)
    }
}
