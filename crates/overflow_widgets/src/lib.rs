//! Overflow Widget Library
//!
//! A scroll container that shows directional indicators where content is
//! clipped and auto-scrolls while the pointer rests on one.

pub mod overflow;
pub mod widget;

pub use overflow::{
    AutoScrollDriver, AutoScrollEvent, AutoScrollState, BoundaryFlags, ConfigError,
    ConfigWarning, MountContext, OverflowConfig, OverflowContainer, TickOutcome,
    INDICATOR_THICKNESS,
};
pub use widget::{Widget, WidgetId};
