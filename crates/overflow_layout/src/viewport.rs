//! Scroll viewport primitive
//!
//! A [`Viewport`] is the host's scrollable element: it reports
//! [`ScrollMetrics`] and accepts scroll requests. [`ScrollViewport`] is the
//! in-memory implementation used by the headless host, with DOM-like
//! semantics: offsets are clamped to `[0, content - client]` and every offset
//! change queues a scroll notification.
//!
//! [`ViewportRef`] forwards a widget's inner viewport to external callers once
//! it exists.

use std::fmt;
use std::sync::{Arc, Mutex};

use overflow_core::Axis;

/// Scroll state along one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisMetrics {
    /// Current scroll offset
    pub offset: f32,
    /// Total scrollable extent (never smaller than `visible_extent`)
    pub content_extent: f32,
    /// Extent of the visible box
    pub visible_extent: f32,
}

impl AxisMetrics {
    pub fn new(offset: f32, content_extent: f32, visible_extent: f32) -> Self {
        Self {
            offset,
            content_extent,
            visible_extent,
        }
    }

    /// True when content does not fit the visible box
    pub fn overflows(&self) -> bool {
        self.content_extent > self.visible_extent
    }

    /// Largest reachable offset
    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.visible_extent).max(0.0)
    }
}

/// Snapshot of both axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub horizontal: AxisMetrics,
    pub vertical: AxisMetrics,
}

impl ScrollMetrics {
    pub fn axis(&self, axis: Axis) -> AxisMetrics {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// A scrollable element provided by the host
pub trait Viewport {
    /// Current offsets and extents
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Scroll by a relative amount
    fn scroll_by(&mut self, dx: f32, dy: f32);

    /// Scroll to an absolute offset
    fn scroll_to(&mut self, x: f32, y: f32);

    /// Visible box size `(width, height)`
    fn client_size(&self) -> (f32, f32) {
        let metrics = self.scroll_metrics();
        (
            metrics.horizontal.visible_extent,
            metrics.vertical.visible_extent,
        )
    }

    /// Consume a pending scroll notification, if the offset changed since the
    /// last call. Hosts that deliver scroll events natively keep the default.
    fn take_scroll_event(&mut self) -> bool {
        false
    }
}

/// Viewport shared between a host, a widget and forwarded refs
pub type SharedViewport = Arc<Mutex<dyn Viewport + Send>>;

/// In-memory scrollable box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollViewport {
    scroll_left: f32,
    scroll_top: f32,
    client_width: f32,
    client_height: f32,
    content_width: f32,
    content_height: f32,
    scroll_pending: bool,
}

impl ScrollViewport {
    pub fn new(client_width: f32, client_height: f32) -> Self {
        Self {
            client_width,
            client_height,
            ..Default::default()
        }
    }

    /// Set the size of the hosted content
    pub fn with_content(mut self, width: f32, height: f32) -> Self {
        self.set_content_size(width, height);
        self
    }

    /// Wrap for sharing
    pub fn shared(self) -> Arc<Mutex<ScrollViewport>> {
        Arc::new(Mutex::new(self))
    }

    pub fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Scrollable width (`max(content, client)`)
    pub fn scroll_width(&self) -> f32 {
        self.content_width.max(self.client_width)
    }

    /// Scrollable height (`max(content, client)`)
    pub fn scroll_height(&self) -> f32 {
        self.content_height.max(self.client_height)
    }

    pub fn set_client_size(&mut self, width: f32, height: f32) {
        self.client_width = width;
        self.client_height = height;
        self.clamp_offsets();
    }

    pub fn set_content_size(&mut self, width: f32, height: f32) {
        self.content_width = width;
        self.content_height = height;
        self.clamp_offsets();
    }

    fn clamp_offsets(&mut self) {
        let (x, y) = (self.scroll_left, self.scroll_top);
        self.set_offsets(x, y);
    }

    fn set_offsets(&mut self, x: f32, y: f32) {
        let max_x = (self.scroll_width() - self.client_width).max(0.0);
        let max_y = (self.scroll_height() - self.client_height).max(0.0);
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
        let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, max_y) };

        if x != self.scroll_left || y != self.scroll_top {
            tracing::trace!(
                "viewport scroll ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                self.scroll_left,
                self.scroll_top,
                x,
                y
            );
            self.scroll_left = x;
            self.scroll_top = y;
            self.scroll_pending = true;
        }
    }
}

impl Viewport for ScrollViewport {
    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            horizontal: AxisMetrics::new(self.scroll_left, self.scroll_width(), self.client_width),
            vertical: AxisMetrics::new(self.scroll_top, self.scroll_height(), self.client_height),
        }
    }

    fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.set_offsets(self.scroll_left + dx, self.scroll_top + dy);
    }

    fn scroll_to(&mut self, x: f32, y: f32) {
        self.set_offsets(x, y);
    }

    fn take_scroll_event(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

/// Forwarded handle to a widget's inner viewport
///
/// Bind a ref to a widget before mounting; it is filled once the viewport
/// exists and cleared when the widget is torn down. All operations are no-ops
/// while unbound.
#[derive(Clone, Default)]
pub struct ViewportRef {
    inner: Arc<Mutex<Option<SharedViewport>>>,
}

impl ViewportRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the ref at a viewport, or detach it
    pub fn set(&self, viewport: Option<SharedViewport>) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = viewport;
        }
    }

    pub fn get(&self) -> Option<SharedViewport> {
        self.inner.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn is_bound(&self) -> bool {
        self.get().is_some()
    }

    /// Current metrics, if bound
    pub fn metrics(&self) -> Option<ScrollMetrics> {
        let viewport = self.get()?;
        let guard = viewport.lock().ok()?;
        Some(guard.scroll_metrics())
    }

    /// Scroll by a relative amount. Returns false while unbound.
    pub fn scroll_by(&self, dx: f32, dy: f32) -> bool {
        self.with_viewport(|v| v.scroll_by(dx, dy))
    }

    /// Scroll to an absolute offset. Returns false while unbound.
    pub fn scroll_to(&self, x: f32, y: f32) -> bool {
        self.with_viewport(|v| v.scroll_to(x, y))
    }

    fn with_viewport(&self, f: impl FnOnce(&mut (dyn Viewport + Send + 'static))) -> bool {
        let Some(viewport) = self.get() else {
            return false;
        };
        let Ok(mut guard) = viewport.lock() else {
            return false;
        };
        f(&mut *guard);
        true
    }
}

impl fmt::Debug for ViewportRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportRef")
            .field("bound", &self.is_bound())
            .finish()
    }
}
