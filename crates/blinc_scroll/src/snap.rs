//! Snap offsets
//!
//! Snap offsets are the rest positions a released scrollable may be pulled
//! toward. They are stored in descending order from 0 (content start) to
//! `-scrollable_distance` (content end) with no duplicates.

use smallvec::SmallVec;

use crate::axis::{near_equal, near_zero, Dimension, EPSILON};

/// Intervals shorter than this (in pixels) disable snapping
pub const MIN_SNAP_INTERVAL: f32 = 1.0;

/// Upper bound on generated interior interval points
pub const MAX_INTERVAL_SNAP_POINTS: usize = 1 << 16;

pub type SnapOffsetList = SmallVec<[f32; 8]>;

/// How an interval-sized page aligns with the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Source of the snap positions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapMode {
    /// Evenly spaced pages; `Percent` is relative to the viewport length
    Interval(Dimension),
    /// Explicit positions measured from the content start, non-decreasing;
    /// `Percent` is relative to the viewport length
    Paginations(Vec<Dimension>),
}

/// Snap configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapOptions {
    pub align: SnapAlign,
    pub mode: SnapMode,
    /// Allow landing between the content start and the first snap point
    pub enable_snap_to_start: bool,
    /// Allow landing between the last snap point and the content end
    pub enable_snap_to_end: bool,
}

impl ScrollSnapOptions {
    pub fn interval(size: Dimension, align: SnapAlign) -> Self {
        Self {
            align,
            mode: SnapMode::Interval(size),
            enable_snap_to_start: true,
            enable_snap_to_end: true,
        }
    }

    pub fn paginations(positions: Vec<Dimension>) -> Self {
        Self {
            align: SnapAlign::Start,
            mode: SnapMode::Paginations(positions),
            enable_snap_to_start: true,
            enable_snap_to_end: true,
        }
    }

    /// One page per viewport length
    pub fn paging() -> Self {
        Self::interval(Dimension::Percent(1.0), SnapAlign::Start)
    }

    pub fn with_snap_to_side(mut self, start: bool, end: bool) -> Self {
        self.enable_snap_to_start = start;
        self.enable_snap_to_end = end;
        self
    }
}

/// Interval snap offsets for a viewport of `viewport_length` over
/// `scrollable_distance` of travel.
///
/// Both boundaries are always present; interior points closer than
/// [`EPSILON`] to a boundary are dropped.
pub fn calc_snap_offsets_by_interval(
    interval: f32,
    align: SnapAlign,
    viewport_length: f32,
    scrollable_distance: f32,
) -> SnapOffsetList {
    let mut offsets = SnapOffsetList::new();
    offsets.push(0.0);
    let end = -scrollable_distance.max(0.0);

    if interval.is_finite() && interval >= MIN_SNAP_INTERVAL {
        let factor = match align {
            SnapAlign::Start => 0.0,
            SnapAlign::Center => 0.5,
            SnapAlign::End => 1.0,
        };
        let first = ((viewport_length - interval) * factor).rem_euclid(interval);

        let steps = ((first - end) / interval).floor() as usize;
        if steps > MAX_INTERVAL_SNAP_POINTS {
            tracing::warn!(steps, interval, "too many interval snap points, truncated");
        }
        for step in 0..=steps.min(MAX_INTERVAL_SNAP_POINTS) {
            let position = first - step as f32 * interval;
            if position <= end + EPSILON {
                break;
            }
            let last = offsets.last().copied().unwrap_or(0.0);
            if position < -EPSILON && position < last - EPSILON {
                offsets.push(position);
            }
        }
    }

    if end < -EPSILON {
        offsets.push(end);
    }
    offsets
}

/// Pagination snap offsets. Entries that go backwards are skipped.
pub fn calc_snap_offsets_by_paginations(
    positions: &[Dimension],
    viewport_length: f32,
    scrollable_distance: f32,
    dip_scale: f32,
) -> SnapOffsetList {
    let mut offsets = SnapOffsetList::new();
    offsets.push(0.0);
    let distance = scrollable_distance.max(0.0);

    let mut previous = 0.0_f32;
    for dimension in positions {
        let position = dimension.to_px(dip_scale, viewport_length);
        if position < previous - EPSILON {
            tracing::warn!(position, previous, "snap pagination out of order, skipped");
            continue;
        }
        previous = position;
        let offset = -position;
        let last = offsets.last().copied().unwrap_or(0.0);
        if position > EPSILON && position < distance - EPSILON && !near_equal(offset, last) {
            offsets.push(offset);
        }
    }

    if distance > EPSILON {
        offsets.push(-distance);
    }
    offsets
}

/// Computed snap positions plus the side-suppression flags
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapOffsets {
    offsets: SnapOffsetList,
    by_interval: bool,
    enable_snap_to_start: bool,
    enable_snap_to_end: bool,
}

impl SnapOffsets {
    /// Rebuild from configuration and the current layout
    pub fn calculate(
        options: &ScrollSnapOptions,
        viewport_length: f32,
        scrollable_distance: f32,
        dip_scale: f32,
    ) -> Self {
        let (offsets, by_interval) = match &options.mode {
            SnapMode::Interval(size) => {
                let interval = size.to_px(dip_scale, viewport_length);
                if interval < MIN_SNAP_INTERVAL {
                    tracing::warn!(interval, "snap interval too small, snapping disabled");
                    return Self::default();
                }
                let offsets = calc_snap_offsets_by_interval(
                    interval,
                    options.align,
                    viewport_length,
                    scrollable_distance,
                );
                (offsets, true)
            }
            SnapMode::Paginations(positions) => (
                calc_snap_offsets_by_paginations(
                    positions,
                    viewport_length,
                    scrollable_distance,
                    dip_scale,
                ),
                false,
            ),
        };
        tracing::debug!(count = offsets.len(), by_interval, "snap offsets rebuilt");
        Self {
            offsets,
            by_interval,
            enable_snap_to_start: options.enable_snap_to_start,
            enable_snap_to_end: options.enable_snap_to_end,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.offsets
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn is_by_interval(&self) -> bool {
        self.by_interval
    }

    /// First interior point after the start, and last interior point before
    /// the end
    fn side_points(&self) -> Option<(f32, f32)> {
        let len = self.offsets.len();
        if len < 2 {
            return None;
        }
        Some((self.offsets[1], self.offsets[len - 2]))
    }

    /// Correction from `current` to the snap offset nearest to where a move of
    /// `delta` would land. `None` when there is nothing to snap to or when a
    /// suppressed side region owns the landing.
    pub fn predict_snap_offset(&self, current: f32, delta: f32) -> Option<f32> {
        let (&head, &tail) = (self.offsets.first()?, self.offsets.last()?);
        let landing = current + delta;

        if let Some((first_interior, last_interior)) = self.side_points() {
            if !self.enable_snap_to_start {
                let past = landing > first_interior + EPSILON
                    || (self.by_interval && current > first_interior + EPSILON);
                if past {
                    return None;
                }
            }
            if !self.enable_snap_to_end {
                let past = landing < last_interior - EPSILON
                    || (self.by_interval && current < last_interior - EPSILON);
                if past {
                    return None;
                }
            }
        }

        let target = if landing >= head {
            head
        } else if landing <= tail {
            tail
        } else {
            let mut target = tail;
            for pair in self.offsets.windows(2) {
                let (upper, lower) = (pair[0], pair[1]);
                if landing >= lower {
                    target = if landing - lower < upper - landing {
                        lower
                    } else {
                        upper
                    };
                    break;
                }
            }
            target
        };
        Some(target - current)
    }

    /// Whether a move of `delta` from `current` crosses one of the
    /// side-suppressed snap points
    pub fn need_scroll_snap_to_side(&self, current: f32, delta: f32) -> bool {
        let Some((first_interior, last_interior)) = self.side_points() else {
            return false;
        };
        let landing = current + delta;
        if !self.enable_snap_to_start
            && current >= first_interior - EPSILON
            && landing <= first_interior + EPSILON
            && !near_zero(delta)
        {
            return true;
        }
        if !self.enable_snap_to_end
            && current <= last_interior + EPSILON
            && landing >= last_interior - EPSILON
            && !near_zero(delta)
        {
            return true;
        }
        false
    }
}
