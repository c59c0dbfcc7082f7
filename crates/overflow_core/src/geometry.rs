//! Scroll axes and directions

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The (backward, forward) directions along this axis
    pub fn directions(self) -> (ScrollDirection, ScrollDirection) {
        match self {
            Axis::Horizontal => (ScrollDirection::Left, ScrollDirection::Right),
            Axis::Vertical => (ScrollDirection::Up, ScrollDirection::Down),
        }
    }
}

/// One of the four directions a viewport can be scrolled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ScrollDirection {
    /// All directions, horizontal first
    pub const ALL: [ScrollDirection; 4] = [
        ScrollDirection::Left,
        ScrollDirection::Right,
        ScrollDirection::Up,
        ScrollDirection::Down,
    ];

    pub fn axis(self) -> Axis {
        match self {
            ScrollDirection::Left | ScrollDirection::Right => Axis::Horizontal,
            ScrollDirection::Up | ScrollDirection::Down => Axis::Vertical,
        }
    }

    /// Left and up move the offset towards zero
    pub fn is_backward(self) -> bool {
        matches!(self, ScrollDirection::Left | ScrollDirection::Up)
    }

    /// Signed offset change for a step of `distance` pixels
    pub fn signed(self, distance: f32) -> f32 {
        if self.is_backward() {
            -distance
        } else {
            distance
        }
    }

    /// `(dx, dy)` for a step of `distance` pixels
    pub fn delta(self, distance: f32) -> (f32, f32) {
        let step = self.signed(distance);
        match self.axis() {
            Axis::Horizontal => (step, 0.0),
            Axis::Vertical => (0.0, step),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScrollDirection::Left => "left",
            ScrollDirection::Right => "right",
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a scroll direction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scroll direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for ScrollDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ScrollDirection::Left),
            "right" => Ok(ScrollDirection::Right),
            "up" => Ok(ScrollDirection::Up),
            "down" => Ok(ScrollDirection::Down),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_signs() {
        assert_eq!(ScrollDirection::Left.delta(10.0), (-10.0, 0.0));
        assert_eq!(ScrollDirection::Right.delta(10.0), (10.0, 0.0));
        assert_eq!(ScrollDirection::Up.delta(4.0), (0.0, -4.0));
        assert_eq!(ScrollDirection::Down.delta(4.0), (0.0, 4.0));
    }

    #[test]
    fn test_axis_directions() {
        for direction in ScrollDirection::ALL {
            let (backward, forward) = direction.axis().directions();
            assert!(direction == backward || direction == forward);
            assert!(backward.is_backward());
            assert!(!forward.is_backward());
        }
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("down".parse::<ScrollDirection>(), Ok(ScrollDirection::Down));
        assert_eq!(ScrollDirection::Up.to_string(), "up");

        let err = "sideways".parse::<ScrollDirection>().unwrap_err();
        assert_eq!(err, ParseDirectionError("sideways".into()));
    }
}
