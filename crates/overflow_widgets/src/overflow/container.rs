//! Overflow container widget
//!
//! Wraps caller content in a scrolling viewport and overlays a hoverable
//! indicator on every edge the content can still scroll towards. Resting the
//! pointer on an indicator scrolls that way until the edge is reached.
//!
//! # Example
//!
//! ```rust
//! use overflow_layout::div;
//! use overflow_widgets::OverflowContainer;
//!
//! let container = OverflowContainer::new()
//!     .scroll_distance(20.0)
//!     .vertical_scroll_indicators(true)
//!     .class_name("gallery")
//!     .child(div().size(600.0, 80.0));
//!
//! let element = container.build();
//! assert!(element.has_class("overflow-container"));
//! assert!(element.has_class("gallery"));
//! ```
//!
//! # Lifecycle
//!
//! The host renders the container, creates the viewport for the element
//! marked `viewport()`, then calls [`OverflowContainer::mount`]. From then on
//! it forwards pointer, scroll, resize and timer events through
//! [`Widget::handle_event`]. [`OverflowContainer::unmount`] (or dropping the
//! container) cancels auto-scroll and releases the resize observation.

use indexmap::IndexMap;
use overflow_animation::{interval_period, SharedTimerScheduler, TimerId};
use overflow_core::events::{event_types, Event, EventData};
use overflow_core::ScrollDirection;
use overflow_layout::style::{Edge, LayoutStyle, Position, Style};
use overflow_layout::{
    div, Element, ResizeRegistry, ResizeSubscription, SharedResizeRegistry, SharedViewport,
    ViewportRef,
};
use smallvec::SmallVec;

use super::auto_scroll::{AutoScrollDriver, AutoScrollState, TickOutcome};
use super::boundary::BoundaryFlags;
use super::config::OverflowConfig;
use crate::widget::{Widget, WidgetId};

/// Thickness of an indicator strip, in pixels
pub const INDICATOR_THICKNESS: f32 = 24.0;

const ROOT_CLASS: &str = "overflow-container";
const INDICATORS_CLASS: &str = "overflow-container__indicators";
const INDICATOR_CLASS: &str = "overflow-container__indicator";
const INNER_CLASS: &str = "overflow-container__inner";
const HIDE_SCROLLBAR_X_CLASS: &str = "overflow-container__inner--hide-scrollbar-x";
const HIDE_SCROLLBAR_Y_CLASS: &str = "overflow-container__inner--hide-scrollbar-y";

/// Host services a container needs while mounted
#[derive(Clone)]
pub struct MountContext {
    pub scheduler: SharedTimerScheduler,
    pub resize: SharedResizeRegistry,
}

impl MountContext {
    pub fn new(scheduler: SharedTimerScheduler, resize: SharedResizeRegistry) -> Self {
        Self { scheduler, resize }
    }
}

/// Scroll container with edge indicators and hover auto-scroll
pub struct OverflowContainer {
    id: WidgetId,
    config: OverflowConfig,
    /// Pass-through attributes for the outer element
    attrs: IndexMap<String, String>,
    content: Vec<Element>,
    /// Fixed outer size; fills the parent when unset
    size: Option<(f32, f32)>,
    viewport_ref: Option<ViewportRef>,

    // Mounted state
    viewport: Option<SharedViewport>,
    resize: Option<ResizeSubscription>,
    flags: BoundaryFlags,
    driver: AutoScrollDriver,
}

impl OverflowContainer {
    pub fn new() -> Self {
        Self::with_config(OverflowConfig::default())
    }

    pub fn with_config(config: OverflowConfig) -> Self {
        let id = WidgetId::next();
        Self {
            id,
            config,
            attrs: IndexMap::new(),
            content: Vec::new(),
            size: None,
            viewport_ref: None,
            viewport: None,
            resize: None,
            flags: BoundaryFlags::default(),
            driver: AutoScrollDriver::new(id.raw()),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Add content to the scrolling area
    pub fn child(mut self, child: Element) -> Self {
        self.content.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.content.extend(children);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: OverflowConfig) -> Self {
        self.config = config;
        self
    }

    /// Milliseconds between auto-scroll steps
    pub fn scroll_speed(mut self, ms: f32) -> Self {
        self.config.scroll_speed = ms;
        self
    }

    /// Pixels per auto-scroll step
    pub fn scroll_distance(mut self, px: f32) -> Self {
        self.config.scroll_distance = px;
        self
    }

    /// Tolerance before an edge counts as reached
    pub fn scroll_end_padding(mut self, px: f32) -> Self {
        self.config.scroll_end_padding = px;
        self
    }

    pub fn show_scroll_indicators(mut self, show: bool) -> Self {
        self.config.show_scroll_indicators = show;
        self
    }

    pub fn horizontal_scroll_indicators(mut self, show: bool) -> Self {
        self.config.horizontal_scroll_indicators = show;
        self
    }

    pub fn vertical_scroll_indicators(mut self, show: bool) -> Self {
        self.config.vertical_scroll_indicators = show;
        self
    }

    pub fn horizontal_indicator_class_name(mut self, class: impl Into<String>) -> Self {
        self.config.horizontal_indicator_class_name = Some(class.into());
        self
    }

    pub fn vertical_indicator_class_name(mut self, class: impl Into<String>) -> Self {
        self.config.vertical_indicator_class_name = Some(class.into());
        self
    }

    pub fn scroll_on_hover(mut self, enabled: bool) -> Self {
        self.config.scroll_on_hover = enabled;
        self
    }

    pub fn hide_horizontal_scrollbar(mut self, hide: bool) -> Self {
        self.config.hide_horizontal_scrollbar = hide;
        self
    }

    pub fn hide_vertical_scrollbar(mut self, hide: bool) -> Self {
        self.config.hide_vertical_scrollbar = hide;
        self
    }

    /// Extra classes on the outer element
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.config.class_name = Some(class.into());
        self
    }

    /// Extra classes on the scrolling element
    pub fn container_class_name(mut self, class: impl Into<String>) -> Self {
        self.config.container_class_name = Some(class.into());
        self
    }

    /// Pass an attribute through to the outer element
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Fixed outer size in pixels
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Forward the inner viewport to `viewport_ref` while mounted
    pub fn bind(mut self, viewport_ref: &ViewportRef) -> Self {
        self.viewport_ref = Some(viewport_ref.clone());
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach to the host's viewport for the inner element.
    ///
    /// Mounting an already mounted container remounts it.
    pub fn mount(&mut self, ctx: &MountContext, viewport: SharedViewport) {
        if self.is_mounted() {
            self.unmount();
        }

        self.config.log_warnings();
        self.driver.attach(&ctx.scheduler);
        self.resize = ResizeRegistry::observe(&ctx.resize, self.id.raw(), &viewport);
        if let Some(viewport_ref) = &self.viewport_ref {
            viewport_ref.set(Some(viewport.clone()));
        }
        self.viewport = Some(viewport);

        let flags = self.update_boundaries();
        tracing::debug!("{} mounted, flags={:?}", self.id, flags);
    }

    /// Cancel auto-scroll and release host resources. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.driver.stop();
        if self.viewport.take().is_none() {
            return;
        }
        self.resize = None;
        if let Some(viewport_ref) = &self.viewport_ref {
            viewport_ref.set(None);
        }
        self.flags = BoundaryFlags::default();
        tracing::debug!("{} unmounted", self.id);
    }

    /// Replace the configuration of a live container.
    ///
    /// Returns the number of configuration warnings logged, which is zero
    /// unless the container is mounted and a numeric field changed.
    pub fn set_config(&mut self, config: OverflowConfig) -> usize {
        let numeric_changed = self.config.numeric_changed(&config);
        self.config = config;
        let warnings = if numeric_changed && self.is_mounted() {
            self.config.log_warnings()
        } else {
            0
        };
        if !self.config.scroll_on_hover {
            self.driver.stop();
        }
        self.update_boundaries();
        warnings
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    /// Recompute boundary flags from the viewport's current metrics
    pub fn update_boundaries(&mut self) -> BoundaryFlags {
        let metrics = match &self.viewport {
            Some(viewport) => match viewport.lock() {
                Ok(guard) => guard.scroll_metrics(),
                Err(_) => return self.flags,
            },
            None => return self.flags,
        };
        let flags = BoundaryFlags::compute(&metrics, self.config.scroll_end_padding);
        self.set_flags(flags);
        flags
    }

    /// The pointer entered the indicator for `direction`.
    ///
    /// Returns true if an auto-scroll session started.
    pub fn on_indicator_enter(&mut self, direction: ScrollDirection) -> bool {
        if !self.config.scroll_on_hover {
            return false;
        }
        if self.viewport.is_none() {
            self.driver.stop();
            return false;
        }
        if !self.visible_indicators().contains(&direction) {
            tracing::debug!("{}: no {} indicator to hover", self.id, direction);
            return false;
        }
        self.driver
            .start(direction, interval_period(self.config.scroll_speed))
    }

    /// The pointer left the indicator for `direction`
    pub fn on_indicator_leave(&mut self, direction: ScrollDirection) -> bool {
        self.config.scroll_on_hover && self.driver.leave(direction)
    }

    /// Handle an interval tick
    pub fn on_timer(&mut self, timer: TimerId) {
        if !self.driver.owns(timer) {
            tracing::trace!("{}: ignoring stale timer {:?}", self.id, timer);
            return;
        }
        let Some(viewport) = self.viewport.clone() else {
            self.driver.stop();
            return;
        };

        let outcome = match viewport.lock() {
            Ok(mut guard) => self.driver.tick(
                timer,
                &mut *guard,
                self.config.scroll_distance,
                self.config.scroll_end_padding,
            ),
            Err(_) => return,
        };

        match outcome {
            TickOutcome::Scrolled(flags) | TickOutcome::Stopped(flags) => self.set_flags(flags),
            TickOutcome::Ignored => {}
        }
    }

    fn set_flags(&mut self, flags: BoundaryFlags) {
        if flags != self.flags {
            tracing::debug!("{} boundary flags {:?}", self.id, flags);
            self.flags = flags;
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn current_config(&self) -> &OverflowConfig {
        &self.config
    }

    pub fn boundary_flags(&self) -> BoundaryFlags {
        self.flags
    }

    pub fn auto_scroll_state(&self) -> AutoScrollState {
        self.driver.state()
    }

    pub fn driver(&self) -> &AutoScrollDriver {
        &self.driver
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// True while the resize observation is held
    pub fn is_observing_resize(&self) -> bool {
        self.resize.is_some()
    }

    /// The mounted viewport, if any
    pub fn viewport(&self) -> Option<&SharedViewport> {
        self.viewport.as_ref()
    }

    /// The forwarded ref set with [`bind`](Self::bind)
    pub fn viewport_ref(&self) -> Option<&ViewportRef> {
        self.viewport_ref.as_ref()
    }

    /// Directions whose indicator is currently rendered
    pub fn visible_indicators(&self) -> SmallVec<[ScrollDirection; 4]> {
        if !self.config.show_scroll_indicators {
            return SmallVec::new();
        }
        ScrollDirection::ALL
            .into_iter()
            .filter(|direction| self.axis_enabled(*direction) && self.flags.can_scroll(*direction))
            .collect()
    }

    fn axis_enabled(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Left | ScrollDirection::Right => {
                self.config.horizontal_scroll_indicators
            }
            ScrollDirection::Up | ScrollDirection::Down => self.config.vertical_scroll_indicators,
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Build the container's element tree
    pub fn build(&self) -> Element {
        let mut root = div()
            .class(ROOT_CLASS)
            .class_opt(self.config.class_name.as_deref())
            .role("region")
            .aria_label("Scrollable content")
            .style(self.root_style());
        for (name, value) in &self.attrs {
            root = root.attr(name.as_str(), value.as_str());
        }

        if self.config.show_scroll_indicators {
            let overlay = div()
                .class(INDICATORS_CLASS)
                .aria_hidden()
                .style(LayoutStyle::overlay())
                .children(
                    self.visible_indicators()
                        .into_iter()
                        .map(|direction| self.build_indicator(direction)),
                );
            root = root.child(overlay);
        }

        let inner = div()
            .class(INNER_CLASS)
            .class_if(self.config.hide_horizontal_scrollbar, HIDE_SCROLLBAR_X_CLASS)
            .class_if(self.config.hide_vertical_scrollbar, HIDE_SCROLLBAR_Y_CLASS)
            .class_opt(self.config.container_class_name.as_deref())
            .style(LayoutStyle::scroll_container())
            .viewport()
            .children(self.content.iter().cloned().map(Element::flex_none));

        root.child(inner)
    }

    fn root_style(&self) -> Style {
        let mut style = match self.size {
            Some((width, height)) => LayoutStyle::fixed_size(width, height),
            None => LayoutStyle::fill(),
        };
        style.position = Position::Relative;
        style
    }

    fn build_indicator(&self, direction: ScrollDirection) -> Element {
        let (axis_class, edge) = match direction {
            ScrollDirection::Left => (&self.config.horizontal_indicator_class_name, Edge::Left),
            ScrollDirection::Right => (&self.config.horizontal_indicator_class_name, Edge::Right),
            ScrollDirection::Up => (&self.config.vertical_indicator_class_name, Edge::Top),
            ScrollDirection::Down => (&self.config.vertical_indicator_class_name, Edge::Bottom),
        };

        div()
            .class(INDICATOR_CLASS)
            .class(format!("{INDICATOR_CLASS}--{direction}"))
            .class_opt(axis_class.as_deref())
            .style(LayoutStyle::edge_strip(edge, INDICATOR_THICKNESS))
            .region(direction.as_str())
    }
}

impl Default for OverflowContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for OverflowContainer {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn render(&self) -> Element {
        self.build()
    }

    fn handle_event(&mut self, event: &Event) {
        match event.event_type {
            event_types::POINTER_ENTER => {
                if let Some(direction) = indicator_direction(event) {
                    self.on_indicator_enter(direction);
                }
            }
            event_types::POINTER_LEAVE => {
                if let Some(direction) = indicator_direction(event) {
                    self.on_indicator_leave(direction);
                }
            }
            event_types::SCROLL | event_types::RESIZE => {
                self.update_boundaries();
            }
            event_types::TIMER => {
                if let EventData::Timer { timer } = event.data {
                    self.on_timer(TimerId::from_raw(timer));
                }
            }
            event_types::UNMOUNT => self.unmount(),
            _ => {}
        }
    }
}

impl Drop for OverflowContainer {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Direction named by the event's hover region, if it is an indicator
fn indicator_direction(event: &Event) -> Option<ScrollDirection> {
    event.region()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use overflow_animation::TimerScheduler;
    use overflow_layout::{ScrollViewport, Viewport};
    use std::sync::{Arc, Mutex};

    fn context() -> MountContext {
        MountContext::new(TimerScheduler::shared(), ResizeRegistry::shared())
    }

    fn mounted(
        container: OverflowContainer,
    ) -> (OverflowContainer, MountContext, Arc<Mutex<ScrollViewport>>) {
        let ctx = context();
        let viewport = ScrollViewport::new(100.0, 50.0)
            .with_content(300.0, 50.0)
            .shared();
        let mut container = container;
        container.mount(&ctx, viewport.clone());
        (container, ctx, viewport)
    }

    #[test]
    fn test_unmounted_render() {
        let container = OverflowContainer::new();
        let el = container.build();

        assert_eq!(el.role_name(), Some("region"));
        assert_eq!(el.attribute("aria-label"), Some("Scrollable content"));

        let overlay = el.find(&|e| e.has_class(INDICATORS_CLASS)).unwrap();
        assert_eq!(overlay.attribute("aria-hidden"), Some("true"));
        assert!(overlay.child_elements().is_empty());

        let inner = el.find(&|e| e.is_viewport()).unwrap();
        assert_eq!(inner.class_name(), INNER_CLASS);
    }

    #[test]
    fn test_mount_computes_flags() {
        let (container, _ctx, _viewport) = mounted(OverflowContainer::new());
        let flags = container.boundary_flags();
        assert!(!flags.can_scroll_left);
        assert!(flags.can_scroll_right);
        assert_eq!(container.visible_indicators().as_slice(), [ScrollDirection::Right]);
        assert!(container.is_observing_resize());
    }

    #[test]
    fn test_scroll_event_updates_flags() {
        let (mut container, _ctx, viewport) = mounted(OverflowContainer::new());
        viewport.lock().unwrap().scroll_to(195.0, 0.0);
        container.handle_event(&Event::scroll(container.id().raw(), 195.0, 0.0));

        let flags = container.boundary_flags();
        assert!(flags.can_scroll_left);
        assert!(!flags.can_scroll_right);

        let el = container.build();
        assert_eq!(el.region_names(), ["left"]);
    }

    #[test]
    fn test_indicator_classes() {
        let (container, _ctx, _viewport) = mounted(
            OverflowContainer::new()
                .horizontal_indicator_class_name("fade")
                .hide_horizontal_scrollbar(true)
                .container_class_name("track"),
        );
        let el = container.build();

        let right = el.find_region("right").unwrap();
        assert_eq!(
            right.class_name(),
            "overflow-container__indicator overflow-container__indicator--right fade"
        );

        let inner = el.find(&|e| e.is_viewport()).unwrap();
        assert_eq!(
            inner.class_name(),
            "overflow-container__inner overflow-container__inner--hide-scrollbar-x track"
        );
    }

    #[test]
    fn test_hidden_indicators() {
        let (container, _ctx, _viewport) =
            mounted(OverflowContainer::new().show_scroll_indicators(false));
        let el = container.build();

        assert!(el.find(&|e| e.has_class(INDICATORS_CLASS)).is_none());
        assert!(container.visible_indicators().is_empty());
    }

    #[test]
    fn test_vertical_indicators_are_opt_in() {
        let ctx = context();
        let viewport: SharedViewport = ScrollViewport::new(100.0, 100.0)
            .with_content(100.0, 400.0)
            .shared();

        let mut container = OverflowContainer::new();
        container.mount(&ctx, viewport.clone());
        assert!(container.boundary_flags().can_scroll_down);
        assert!(container.visible_indicators().is_empty());

        let config = OverflowConfig {
            vertical_scroll_indicators: true,
            ..Default::default()
        };
        container.set_config(config);
        assert_eq!(container.visible_indicators().as_slice(), [ScrollDirection::Down]);
    }

    #[test]
    fn test_pass_through_attributes() {
        let container = OverflowContainer::new()
            .attr("data-testid", "gallery")
            .attr("aria-label", "Photos");
        let el = container.build();

        assert_eq!(el.attribute("data-testid"), Some("gallery"));
        assert_eq!(el.attribute("aria-label"), Some("Photos"));
    }

    #[test]
    fn test_hover_disabled() {
        let (mut container, ctx, _viewport) =
            mounted(OverflowContainer::new().scroll_on_hover(false));
        assert!(!container.on_indicator_enter(ScrollDirection::Right));
        assert_eq!(container.auto_scroll_state(), AutoScrollState::Idle);
        assert!(ctx.scheduler.lock().unwrap().is_empty());
    }

    #[test]
    fn test_hover_on_hidden_indicator_is_ignored() {
        let (mut container, ctx, _viewport) = mounted(OverflowContainer::new());
        assert!(!container.on_indicator_enter(ScrollDirection::Left));
        assert!(ctx.scheduler.lock().unwrap().is_empty());
    }

    #[test]
    fn test_hover_right_scrolls_until_boundary() {
        let (mut container, ctx, viewport) = mounted(OverflowContainer::new());
        let id = container.id().raw();

        container.handle_event(&Event::pointer_enter(id, "right", 190.0, 25.0));
        assert_eq!(
            container.auto_scroll_state(),
            AutoScrollState::Scrolling(ScrollDirection::Right)
        );

        let mut offsets = Vec::new();
        for _ in 0..30 {
            let events = ctx
                .scheduler
                .lock()
                .unwrap()
                .advance(std::time::Duration::from_millis(10));
            for event in &events {
                container.handle_event(event);
            }
            let mut guard = viewport.lock().unwrap();
            if guard.take_scroll_event() {
                offsets.push(guard.scroll_left());
            }
        }

        let expected: Vec<f32> = (1..=19).map(|step| step as f32 * 10.0).collect();
        assert_eq!(offsets, expected);
        assert_eq!(container.auto_scroll_state(), AutoScrollState::Idle);
        assert!(ctx.scheduler.lock().unwrap().is_empty());
        assert!(!container.boundary_flags().can_scroll_right);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let viewport_ref = ViewportRef::new();
        let (mut container, ctx, _viewport) = mounted(OverflowContainer::new().bind(&viewport_ref));
        assert!(viewport_ref.is_bound());

        container.on_indicator_enter(ScrollDirection::Right);
        assert!(!ctx.scheduler.lock().unwrap().is_empty());

        container.unmount();
        assert!(ctx.scheduler.lock().unwrap().is_empty());
        assert!(ctx.resize.lock().unwrap().is_empty());
        assert!(!viewport_ref.is_bound());
        assert!(!container.is_mounted());

        // Idempotent
        container.unmount();
        container.handle_event(&Event::unmount(container.id().raw()));
    }

    #[test]
    fn test_drop_releases_everything() {
        let (mut container, ctx, _viewport) = mounted(OverflowContainer::new());
        container.on_indicator_enter(ScrollDirection::Right);
        drop(container);

        assert!(ctx.scheduler.lock().unwrap().is_empty());
        assert!(ctx.resize.lock().unwrap().is_empty());
    }

    #[test]
    fn test_regions_that_are_not_indicators() {
        let (mut container, ctx, _viewport) = mounted(OverflowContainer::new());
        let id = container.id().raw();
        container.handle_event(&Event::pointer_enter(id, "caption", 10.0, 10.0));
        assert!(ctx.scheduler.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_config_rewarns_on_numeric_change() {
        let (mut container, _ctx, _viewport) = mounted(OverflowContainer::new());

        let negative = OverflowConfig {
            scroll_distance: -5.0,
            scroll_end_padding: -1.0,
            ..Default::default()
        };
        assert_eq!(container.set_config(negative.clone()), 2);

        // Non-numeric change keeps the same invalid numbers: no new warnings
        let flags_only = OverflowConfig {
            show_scroll_indicators: false,
            ..negative
        };
        assert_eq!(container.set_config(flags_only), 0);
        assert_eq!(container.current_config().scroll_distance, -5.0);
    }

    #[test]
    fn test_set_config_unmounted_does_not_warn() {
        let mut container = OverflowContainer::new();
        let config = OverflowConfig {
            scroll_speed: -10.0,
            ..Default::default()
        };
        assert_eq!(container.set_config(config), 0);
        assert_eq!(container.current_config().scroll_speed, -10.0);
    }
}
