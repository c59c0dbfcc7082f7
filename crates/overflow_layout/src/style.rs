//! Layout style helpers

pub use taffy::prelude::*;
use taffy::geometry::Point;
pub use taffy::style::{Overflow, Position};

/// Edge of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Helper to create common layout styles
pub struct LayoutStyle;

impl LayoutStyle {
    /// Create a fixed size style
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    /// Relatively positioned box filling its parent
    pub fn fill() -> Style {
        Style {
            display: Display::Flex,
            size: Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Percent(1.0),
            },
            ..Default::default()
        }
    }

    /// Absolutely positioned layer covering its parent
    pub fn overlay() -> Style {
        Style {
            position: Position::Absolute,
            inset: Rect {
                left: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Length(0.0),
                top: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(0.0),
            },
            ..Default::default()
        }
    }

    /// Absolutely positioned strip of `thickness` along one edge
    pub fn edge_strip(edge: Edge, thickness: f32) -> Style {
        let zero = LengthPercentageAuto::Length(0.0);
        let auto = LengthPercentageAuto::Auto;

        let (inset, size) = match edge {
            Edge::Left => (
                Rect {
                    left: zero,
                    right: auto,
                    top: zero,
                    bottom: zero,
                },
                Size {
                    width: Dimension::Length(thickness),
                    height: Dimension::Auto,
                },
            ),
            Edge::Right => (
                Rect {
                    left: auto,
                    right: zero,
                    top: zero,
                    bottom: zero,
                },
                Size {
                    width: Dimension::Length(thickness),
                    height: Dimension::Auto,
                },
            ),
            Edge::Top => (
                Rect {
                    left: zero,
                    right: zero,
                    top: zero,
                    bottom: auto,
                },
                Size {
                    width: Dimension::Auto,
                    height: Dimension::Length(thickness),
                },
            ),
            Edge::Bottom => (
                Rect {
                    left: zero,
                    right: zero,
                    top: auto,
                    bottom: zero,
                },
                Size {
                    width: Dimension::Auto,
                    height: Dimension::Length(thickness),
                },
            ),
        };

        Style {
            position: Position::Absolute,
            inset,
            size,
            ..Default::default()
        }
    }

    /// Box filling its parent that scrolls its content on both axes
    pub fn scroll_container() -> Style {
        Style {
            overflow: Point {
                x: Overflow::Scroll,
                y: Overflow::Scroll,
            },
            scrollbar_width: 0.0,
            ..Self::fill()
        }
    }
}
