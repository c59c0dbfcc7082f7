//! Overflow Layout
//!
//! Element descriptions, Taffy-backed layout, the scroll viewport primitive
//! and resize observation.

pub mod element;
pub mod error;
pub mod resize;
pub mod style;
pub mod tree;
pub mod viewport;

pub use element::{div, Element};
pub use error::LayoutError;
pub use resize::{ResizeRegistry, ResizeSubscription, SharedResizeRegistry};
pub use style::{Edge, LayoutStyle};
pub use tree::{Bounds, LayoutNodeId, LayoutTree, RenderedTree};
pub use viewport::{AxisMetrics, ScrollMetrics, ScrollViewport, SharedViewport, Viewport, ViewportRef};
