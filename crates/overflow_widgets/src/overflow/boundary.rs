//! Boundary tracking
//!
//! [`BoundaryFlags`] tells, for each direction, whether the viewport can
//! still move that way. A direction counts as reachable only while the
//! offset is more than `end_padding` away from the corresponding limit.

use overflow_core::ScrollDirection;
use overflow_layout::{AxisMetrics, ScrollMetrics};

/// Which directions can still scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundaryFlags {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,
}

impl BoundaryFlags {
    /// Derive flags from a metrics snapshot
    pub fn compute(metrics: &ScrollMetrics, end_padding: f32) -> Self {
        let (can_scroll_left, can_scroll_right) = axis_flags(metrics.horizontal, end_padding);
        let (can_scroll_up, can_scroll_down) = axis_flags(metrics.vertical, end_padding);
        Self {
            can_scroll_left,
            can_scroll_right,
            can_scroll_up,
            can_scroll_down,
        }
    }

    pub fn can_scroll(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Left => self.can_scroll_left,
            ScrollDirection::Right => self.can_scroll_right,
            ScrollDirection::Up => self.can_scroll_up,
            ScrollDirection::Down => self.can_scroll_down,
        }
    }

    /// True if any direction can scroll
    pub fn any(&self) -> bool {
        self.can_scroll_left || self.can_scroll_right || self.can_scroll_up || self.can_scroll_down
    }

    /// Scrollable directions, horizontal first
    pub fn directions(self) -> impl Iterator<Item = ScrollDirection> {
        ScrollDirection::ALL
            .into_iter()
            .filter(move |direction| self.can_scroll(*direction))
    }
}

/// `(backward, forward)` for one axis
fn axis_flags(axis: AxisMetrics, end_padding: f32) -> (bool, bool) {
    if !axis.overflows() {
        return (false, false);
    }
    let backward = axis.offset > end_padding;
    let forward = axis.offset < axis.content_extent - axis.visible_extent - end_padding;
    (backward, forward)
}
