//! Overflow container
//!
//! - [`config`]: options, defaults and validation
//! - [`boundary`]: which directions can still scroll
//! - [`auto_scroll`]: the hover-driven scrolling state machine
//! - [`container`]: the widget tying them to a viewport

pub mod auto_scroll;
pub mod boundary;
pub mod config;
pub mod container;

pub use auto_scroll::{AutoScrollDriver, AutoScrollEvent, AutoScrollState, TickOutcome};
pub use boundary::BoundaryFlags;
pub use config::{ConfigError, ConfigWarning, OverflowConfig};
pub use container::{MountContext, OverflowContainer, INDICATOR_THICKNESS};
