//! Headless host
//!
//! Plays the role of a browser for a single [`OverflowContainer`]: lays the
//! rendered tree out with Taffy, owns the [`ScrollViewport`] behind the inner
//! element, tracks the pointer against hover regions and delivers timer,
//! scroll and resize events. Time only moves through [`HeadlessHost::advance`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use overflow_animation::TimerScheduler;
use overflow_core::Event;
use overflow_layout::style::{LayoutStyle, Size};
use overflow_layout::{
    div, Bounds, LayoutTree, RenderedTree, ResizeRegistry, ScrollViewport, Viewport, ViewportRef,
};
use overflow_widgets::{MountContext, OverflowContainer, Widget};
use serde::{Deserialize, Serialize};

/// Upper bound on event/layout rounds per pump
const MAX_SETTLE_ROUNDS: usize = 8;

/// Observable host state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub scroll_width: f32,
    pub scroll_height: f32,
    pub client_width: f32,
    pub client_height: f32,
    /// Rendered indicator directions
    pub indicators: Vec<String>,
    /// Auto-scroll state, `idle` or `scrolling:<direction>`
    pub state: String,
    pub hovered: Option<String>,
    pub active_timers: usize,
    pub resize_observers: usize,
    pub mounted: bool,
    pub elapsed_ms: u64,
}

/// Windowless host for one overflow container
pub struct HeadlessHost {
    container: OverflowContainer,
    ctx: MountContext,
    viewport: Arc<Mutex<ScrollViewport>>,
    viewport_ref: ViewportRef,
    tree: LayoutTree,
    rendered: RenderedTree,
    width: f32,
    height: f32,
    pointer: Option<(f32, f32)>,
    hovered: Option<String>,
    last_offset: (f32, f32),
}

impl HeadlessHost {
    /// Host `container` in a `width` x `height` box with a block of
    /// `content` size as its scrolling content, and mount it.
    pub fn new(
        container: OverflowContainer,
        width: f32,
        height: f32,
        content: (f32, f32),
    ) -> Result<Self> {
        let mut container = container.child(div().size(content.0, content.1));
        let viewport_ref = match container.viewport_ref().cloned() {
            Some(viewport_ref) => viewport_ref,
            None => {
                let viewport_ref = ViewportRef::new();
                container = container.bind(&viewport_ref);
                viewport_ref
            }
        };

        let mut tree = LayoutTree::new();
        let rendered = layout(&mut tree, &container, width, height)?;
        let (client, extent) = tree
            .viewport_extents(&rendered)
            .context("container rendered no scroll viewport")?;
        let viewport = ScrollViewport::new(client.width, client.height)
            .with_content(extent.width, extent.height)
            .shared();

        let ctx = MountContext::new(TimerScheduler::shared(), ResizeRegistry::shared());
        container.mount(&ctx, viewport.clone());
        tracing::debug!(
            "headless host {}x{} mounted {} (content {}x{})",
            width,
            height,
            container.id(),
            extent.width,
            extent.height
        );

        let mut host = Self {
            container,
            ctx,
            viewport,
            viewport_ref,
            tree,
            rendered,
            width,
            height,
            pointer: None,
            hovered: None,
            last_offset: (0.0, 0.0),
        };
        host.pump()?;
        Ok(host)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Move the pointer to `(x, y)` in host coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<()> {
        self.pointer = Some((x, y));
        let region = self
            .tree
            .hit_test_region(&self.rendered, x, y)
            .map(str::to_string);
        self.set_hovered(region, x, y);
        self.pump()
    }

    /// Move the pointer to the centre of the named hover region.
    ///
    /// Returns false if no such region is rendered.
    pub fn hover(&mut self, region: &str) -> Result<bool> {
        let Some(bounds) = self.region_bounds(region) else {
            tracing::debug!("hover: region {:?} is not rendered", region);
            return Ok(false);
        };
        self.pointer_move(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)?;
        Ok(true)
    }

    /// Move the pointer out of the host
    pub fn pointer_exit(&mut self) -> Result<()> {
        self.pointer = None;
        self.set_hovered(None, 0.0, 0.0);
        self.pump()
    }

    /// Scroll the viewport as a mouse wheel would
    pub fn wheel(&mut self, dx: f32, dy: f32) -> Result<()> {
        self.with_viewport(|viewport| viewport.scroll_by(dx, dy))?;
        self.pump()
    }

    /// Scroll the viewport to an absolute offset
    pub fn scroll_to(&mut self, x: f32, y: f32) -> Result<()> {
        self.with_viewport(|viewport| viewport.scroll_to(x, y))?;
        self.pump()
    }

    /// Resize the host box
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.relayout()?;
        self.pump()
    }

    /// Advance time by `ms` milliseconds, delivering every timer that fires
    pub fn advance(&mut self, ms: u64) -> Result<()> {
        let events = self
            .ctx
            .scheduler
            .lock()
            .map_err(|_| anyhow!("timer scheduler lock poisoned"))?
            .advance(Duration::from_millis(ms));

        for event in &events {
            self.deliver(event);
            self.pump()?;
        }
        Ok(())
    }

    /// Tear the container down
    pub fn unmount(&mut self) -> Result<()> {
        let id = self.container.id().raw();
        self.deliver(&Event::unmount(id));
        self.relayout()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn container(&self) -> &OverflowContainer {
        &self.container
    }

    /// Forwarded handle to the inner viewport
    pub fn viewport_ref(&self) -> ViewportRef {
        self.viewport_ref.clone()
    }

    pub fn viewport(&self) -> Arc<Mutex<ScrollViewport>> {
        self.viewport.clone()
    }

    pub fn context(&self) -> &MountContext {
        &self.ctx
    }

    /// Last pointer position, if the pointer is inside the host
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    /// Absolute bounds of a rendered hover region
    pub fn region_bounds(&self, region: &str) -> Option<Bounds> {
        let index = self.rendered.region_index(region)?;
        self.tree.bounds(&self.rendered, index)
    }

    pub fn snapshot(&self) -> HostSnapshot {
        let viewport = self.viewport.lock().ok().map(|v| (*v).clone()).unwrap_or_default();
        let (active_timers, elapsed) = self
            .ctx
            .scheduler
            .lock()
            .map(|s| (s.active_count(), s.elapsed()))
            .unwrap_or_default();
        let resize_observers = self.ctx.resize.lock().map(|r| r.len()).unwrap_or_default();

        HostSnapshot {
            scroll_left: viewport.scroll_left(),
            scroll_top: viewport.scroll_top(),
            scroll_width: viewport.scroll_width(),
            scroll_height: viewport.scroll_height(),
            client_width: viewport.client_size().0,
            client_height: viewport.client_size().1,
            indicators: self
                .container
                .visible_indicators()
                .iter()
                .map(|d| d.to_string())
                .collect(),
            state: self.container.auto_scroll_state().to_string(),
            hovered: self.hovered.clone(),
            active_timers,
            resize_observers,
            mounted: self.container.is_mounted(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn deliver(&mut self, event: &Event) {
        if event.target != self.container.id().raw() {
            tracing::trace!("dropping event for unknown target {}", event.target);
            return;
        }
        self.container.handle_event(event);
    }

    fn set_hovered(&mut self, region: Option<String>, x: f32, y: f32) {
        if region == self.hovered {
            return;
        }
        let id = self.container.id().raw();
        if let Some(previous) = self.hovered.take() {
            self.deliver(&Event::pointer_leave(id, previous, x, y));
        }
        if let Some(next) = &region {
            self.deliver(&Event::pointer_enter(id, next.as_str(), x, y));
        }
        self.hovered = region;
    }

    fn with_viewport(&self, f: impl FnOnce(&mut ScrollViewport)) -> Result<()> {
        let mut guard = self
            .viewport
            .lock()
            .map_err(|_| anyhow!("viewport lock poisoned"))?;
        f(&mut guard);
        Ok(())
    }

    /// Deliver pending scroll and resize notifications and re-layout until
    /// nothing changes.
    fn pump(&mut self) -> Result<()> {
        let id = self.container.id().raw();

        for _ in 0..MAX_SETTLE_ROUNDS {
            let mut pending = Vec::new();
            {
                let mut viewport = self
                    .viewport
                    .lock()
                    .map_err(|_| anyhow!("viewport lock poisoned"))?;
                if viewport.take_scroll_event() {
                    let offset = (viewport.scroll_left(), viewport.scroll_top());
                    pending.push(Event::scroll(
                        id,
                        offset.0 - self.last_offset.0,
                        offset.1 - self.last_offset.1,
                    ));
                    self.last_offset = offset;
                }
            }
            if let Ok(mut registry) = self.ctx.resize.lock() {
                pending.extend(registry.poll());
            }

            let settled = pending.is_empty();
            for event in &pending {
                self.deliver(event);
            }
            self.relayout()?;
            if settled {
                return Ok(());
            }
        }

        tracing::warn!("headless host did not settle after {} rounds", MAX_SETTLE_ROUNDS);
        Ok(())
    }

    /// Lay the current render out and sync the viewport's sizes with it
    fn relayout(&mut self) -> Result<()> {
        self.rendered = layout(&mut self.tree, &self.container, self.width, self.height)?;

        if let Some((client, extent)) = self.tree.viewport_extents(&self.rendered) {
            self.with_viewport(|viewport| sync_viewport(viewport, client, extent))?;
        }

        // A region removed from under the pointer stops being hovered without
        // a leave notification
        if let Some(hovered) = &self.hovered {
            if self.rendered.region_index(hovered).is_none() {
                tracing::trace!("hovered region {:?} is gone", hovered);
                self.hovered = None;
            }
        }

        // A region laid out under a resting pointer is entered
        if let Some((x, y)) = self.pointer {
            let region = self
                .tree
                .hit_test_region(&self.rendered, x, y)
                .map(str::to_string);
            self.set_hovered(region, x, y);
        }
        Ok(())
    }
}

fn layout(
    tree: &mut LayoutTree,
    container: &OverflowContainer,
    width: f32,
    height: f32,
) -> Result<RenderedTree> {
    tree.clear();
    let root = div()
        .style(LayoutStyle::fixed_size(width, height))
        .child(container.render());
    let rendered = tree.build(&root)?;
    tree.compute_layout(rendered.root, width, height)?;
    Ok(rendered)
}

fn sync_viewport(viewport: &mut ScrollViewport, client: Size<f32>, extent: Size<f32>) {
    if viewport.client_size() != (client.width, client.height) {
        viewport.set_client_size(client.width, client.height);
    }
    if (viewport.scroll_width(), viewport.scroll_height())
        != (extent.width.max(client.width), extent.height.max(client.height))
    {
        viewport.set_content_size(extent.width, extent.height);
    }
}
