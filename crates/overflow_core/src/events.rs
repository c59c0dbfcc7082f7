//! Event model
//!
//! Host-agnostic events delivered to widgets. The host translates its own
//! pointer, scroll, resize and timer notifications into these values and
//! hands them to `Widget::handle_event`.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const UNMOUNT: EventType = 61;

    /// A repeating interval fired
    pub const TIMER: EventType = 90;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Raw id of the widget the event is addressed to
    pub target: u64,
    pub data: EventData,
    /// Host time in milliseconds
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        /// Name of the hover region under the pointer, if any
        region: Option<String>,
    },
    Scroll {
        delta_x: f32,
        delta_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Timer {
        /// Raw timer handle (see `TimerId` in the animation crate)
        timer: u64,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
        }
    }

    /// Pointer entered the named hover region
    pub fn pointer_enter(target: u64, region: impl Into<String>, x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_ENTER,
            target,
            EventData::Pointer {
                x,
                y,
                region: Some(region.into()),
            },
        )
    }

    /// Pointer left the named hover region
    pub fn pointer_leave(target: u64, region: impl Into<String>, x: f32, y: f32) -> Self {
        Self::new(
            event_types::POINTER_LEAVE,
            target,
            EventData::Pointer {
                x,
                y,
                region: Some(region.into()),
            },
        )
    }

    pub fn scroll(target: u64, delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            target,
            EventData::Scroll { delta_x, delta_y },
        )
    }

    pub fn resize(target: u64, width: f32, height: f32) -> Self {
        Self::new(
            event_types::RESIZE,
            target,
            EventData::Resize { width, height },
        )
    }

    pub fn timer(target: u64, timer: u64) -> Self {
        Self::new(event_types::TIMER, target, EventData::Timer { timer })
    }

    pub fn unmount(target: u64) -> Self {
        Self::new(event_types::UNMOUNT, target, EventData::None)
    }

    /// Set the host timestamp
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The hover region carried by a pointer event
    pub fn region(&self) -> Option<&str> {
        match &self.data {
            EventData::Pointer { region, .. } => region.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_region() {
        let event = Event::pointer_enter(7, "right", 95.0, 10.0);
        assert_eq!(event.event_type, event_types::POINTER_ENTER);
        assert_eq!(event.target, 7);
        assert_eq!(event.region(), Some("right"));

        let scroll = Event::scroll(7, 0.0, 12.0);
        assert_eq!(scroll.region(), None);
    }

    #[test]
    fn test_timestamp() {
        let event = Event::timer(1, 42).at(250);
        assert_eq!(event.timestamp, 250);
        assert_eq!(event.data, EventData::Timer { timer: 42 });
    }
}
