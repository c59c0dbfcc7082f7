//! Hover-driven auto-scroll
//!
//! [`AutoScrollDriver`] owns at most one scroll session: a direction and the
//! repeating interval that advances the viewport. The session lifecycle is a
//! two-state machine:
//!
//! ```text
//! Idle ──HoverEnter(d)──▶ Scrolling(d) ──HoverLeave(d) | BoundaryReached | Teardown──▶ Idle
//!                         Scrolling(a) ──HoverEnter(d)──▶ Scrolling(d)
//! ```
//!
//! Leaving `Scrolling` cancels the interval; entering it starts a fresh one.
//! Every tick first checks the boundary for the active direction, so the
//! step that would run past the end is never taken.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use overflow_animation::{SharedTimerScheduler, TimerId, TimerScheduler};
use overflow_core::{ScrollDirection, StateMachine, StateTransitions, Transition};
use overflow_layout::Viewport;

use super::boundary::BoundaryFlags;

/// Auto-scroll session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutoScrollState {
    #[default]
    Idle,
    Scrolling(ScrollDirection),
}

impl AutoScrollState {
    pub fn direction(&self) -> Option<ScrollDirection> {
        match self {
            AutoScrollState::Idle => None,
            AutoScrollState::Scrolling(direction) => Some(*direction),
        }
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self, AutoScrollState::Scrolling(_))
    }
}

impl std::fmt::Display for AutoScrollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoScrollState::Idle => f.write_str("idle"),
            AutoScrollState::Scrolling(direction) => write!(f, "scrolling:{direction}"),
        }
    }
}

/// Inputs of the auto-scroll state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollEvent {
    HoverEnter(ScrollDirection),
    HoverLeave(ScrollDirection),
    BoundaryReached,
    Teardown,
}

impl StateTransitions for AutoScrollState {
    type Event = AutoScrollEvent;

    fn on_event(&self, event: &AutoScrollEvent) -> Option<Self> {
        use AutoScrollEvent::*;
        use AutoScrollState::*;

        match (self, event) {
            // Entering restarts the session, even in the same direction
            (_, HoverEnter(direction)) => Some(Scrolling(*direction)),
            (Scrolling(active), HoverLeave(direction)) if active == direction => Some(Idle),
            (Scrolling(_), BoundaryReached | Teardown) => Some(Idle),
            _ => None,
        }
    }
}

/// Result of handling one interval tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to no live session
    Ignored,
    /// The viewport moved one step; flags as observed before the step
    Scrolled(BoundaryFlags),
    /// The active direction was exhausted and the session ended
    Stopped(BoundaryFlags),
}

/// Owner of the single auto-scroll session
pub struct AutoScrollDriver {
    /// Raw id of the widget that receives the interval's events
    owner: u64,
    machine: StateMachine<AutoScrollState>,
    timer: Option<TimerId>,
    period: Duration,
    scheduler: Weak<Mutex<TimerScheduler>>,
}

impl AutoScrollDriver {
    pub fn new(owner: u64) -> Self {
        Self {
            owner,
            machine: StateMachine::new(AutoScrollState::Idle),
            timer: None,
            period: Duration::ZERO,
            scheduler: Weak::new(),
        }
    }

    /// Use `scheduler` for future sessions
    pub fn attach(&mut self, scheduler: &SharedTimerScheduler) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    pub fn is_attached(&self) -> bool {
        self.scheduler.strong_count() > 0
    }

    pub fn state(&self) -> AutoScrollState {
        self.machine.current_state()
    }

    /// Handle of the running interval, if any
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// True if `timer` is the current session's interval
    pub fn owns(&self, timer: TimerId) -> bool {
        self.timer == Some(timer)
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<AutoScrollState>> {
        self.machine.history()
    }

    /// Begin scrolling in `direction`, one step every `period`.
    ///
    /// Any running session is cancelled first. Returns false when no
    /// scheduler is available.
    pub fn start(&mut self, direction: ScrollDirection, period: Duration) -> bool {
        if !self.is_attached() {
            tracing::debug!("auto-scroll {} ignored: no scheduler", direction);
            return false;
        }
        self.period = period;
        self.apply(AutoScrollEvent::HoverEnter(direction));
        self.timer.is_some()
    }

    /// Pointer left the indicator for `direction`. Only ends the session if
    /// it is scrolling that way.
    pub fn leave(&mut self, direction: ScrollDirection) -> bool {
        self.apply(AutoScrollEvent::HoverLeave(direction)).is_some()
    }

    /// End the session, if any. Stopping an idle driver does nothing.
    pub fn stop(&mut self) {
        self.apply(AutoScrollEvent::Teardown);
        self.cancel_timer();
    }

    /// Run one interval tick against `viewport`.
    ///
    /// Boundaries are recomputed before moving: if the active direction can
    /// no longer scroll the session ends without a step.
    pub fn tick(
        &mut self,
        timer: TimerId,
        viewport: &mut dyn Viewport,
        distance: f32,
        end_padding: f32,
    ) -> TickOutcome {
        if !self.owns(timer) {
            tracing::trace!("stale auto-scroll tick {:?}", timer);
            return TickOutcome::Ignored;
        }
        let Some(direction) = self.state().direction() else {
            self.cancel_timer();
            return TickOutcome::Ignored;
        };

        let flags = BoundaryFlags::compute(&viewport.scroll_metrics(), end_padding);
        if !flags.can_scroll(direction) {
            tracing::debug!("auto-scroll {} reached the boundary", direction);
            self.apply(AutoScrollEvent::BoundaryReached);
            return TickOutcome::Stopped(flags);
        }

        let (dx, dy) = direction.delta(distance);
        tracing::trace!("auto-scroll {} by ({}, {})", direction, dx, dy);
        viewport.scroll_by(dx, dy);
        TickOutcome::Scrolled(flags)
    }

    fn apply(&mut self, event: AutoScrollEvent) -> Option<Transition<AutoScrollState>> {
        let transition = self.machine.send(&event)?;
        tracing::debug!(
            "auto-scroll {:?} -> {:?} on {:?}",
            transition.from,
            transition.to,
            event
        );

        if transition.from.is_scrolling() {
            self.cancel_timer();
        }
        if transition.to.is_scrolling() {
            self.start_timer();
        }
        Some(transition)
    }

    fn start_timer(&mut self) {
        let started = self.scheduler.upgrade().and_then(|scheduler| {
            let mut guard = scheduler.lock().ok()?;
            Some(guard.set_interval(self.owner, self.period))
        });

        match started {
            Some(id) => self.timer = Some(id),
            None => {
                tracing::warn!("auto-scroll interval could not be scheduled");
                self.machine.send(&AutoScrollEvent::Teardown);
            }
        }
    }

    fn cancel_timer(&mut self) {
        let Some(id) = self.timer.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            if let Ok(mut guard) = scheduler.lock() {
                guard.clear_interval(id);
            }
        }
    }
}

impl Drop for AutoScrollDriver {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

impl std::fmt::Debug for AutoScrollDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoScrollDriver")
            .field("owner", &self.owner)
            .field("state", &self.state())
            .field("timer", &self.timer)
            .field("period", &self.period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overflow_layout::ScrollViewport;

    const PERIOD: Duration = Duration::from_millis(10);

    fn attached() -> (SharedTimerScheduler, AutoScrollDriver) {
        let scheduler = TimerScheduler::shared();
        let mut driver = AutoScrollDriver::new(1);
        driver.attach(&scheduler);
        (scheduler, driver)
    }

    #[test]
    fn test_transition_table() {
        use AutoScrollEvent::*;
        use AutoScrollState::*;
        use ScrollDirection::*;

        assert_eq!(Idle.on_event(&HoverEnter(Right)), Some(Scrolling(Right)));
        assert_eq!(Scrolling(Right).on_event(&HoverEnter(Left)), Some(Scrolling(Left)));
        assert_eq!(Scrolling(Right).on_event(&HoverEnter(Right)), Some(Scrolling(Right)));
        assert_eq!(Scrolling(Right).on_event(&HoverLeave(Right)), Some(Idle));
        assert_eq!(Scrolling(Right).on_event(&HoverLeave(Left)), None);
        assert_eq!(Scrolling(Down).on_event(&BoundaryReached), Some(Idle));
        assert_eq!(Idle.on_event(&Teardown), None);
        assert_eq!(Idle.on_event(&HoverLeave(Up)), None);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AutoScrollState::Idle.to_string(), "idle");
        assert_eq!(
            AutoScrollState::Scrolling(ScrollDirection::Down).to_string(),
            "scrolling:down"
        );
    }

    #[test]
    fn test_start_without_scheduler() {
        let mut driver = AutoScrollDriver::new(1);
        assert!(!driver.start(ScrollDirection::Right, PERIOD));
        assert_eq!(driver.state(), AutoScrollState::Idle);
        assert!(driver.timer().is_none());
    }

    #[test]
    fn test_single_session() {
        let (scheduler, mut driver) = attached();

        assert!(driver.start(ScrollDirection::Right, PERIOD));
        let first = driver.timer().unwrap();

        assert!(driver.start(ScrollDirection::Left, PERIOD));
        let second = driver.timer().unwrap();

        assert_ne!(first, second);
        let guard = scheduler.lock().unwrap();
        assert!(!guard.is_active(first));
        assert!(guard.is_active(second));
        assert_eq!(guard.active_count(), 1);
    }

    #[test]
    fn test_reentering_same_direction_restarts_timer() {
        let (scheduler, mut driver) = attached();
        driver.start(ScrollDirection::Right, PERIOD);
        let first = driver.timer().unwrap();
        driver.start(ScrollDirection::Right, PERIOD);

        assert_ne!(driver.timer(), Some(first));
        assert_eq!(scheduler.lock().unwrap().active_count(), 1);
        assert!(driver.history().last().unwrap().is_reentry());
    }

    #[test]
    fn test_leave_only_stops_active_direction() {
        let (scheduler, mut driver) = attached();
        driver.start(ScrollDirection::Right, PERIOD);

        assert!(!driver.leave(ScrollDirection::Left));
        assert_eq!(driver.state(), AutoScrollState::Scrolling(ScrollDirection::Right));

        assert!(driver.leave(ScrollDirection::Right));
        assert_eq!(driver.state(), AutoScrollState::Idle);
        assert!(scheduler.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (scheduler, mut driver) = attached();
        driver.stop();
        assert_eq!(driver.history().count(), 0);

        driver.start(ScrollDirection::Down, PERIOD);
        driver.stop();
        driver.stop();
        assert_eq!(driver.state(), AutoScrollState::Idle);
        assert!(driver.timer().is_none());
        assert!(scheduler.lock().unwrap().is_empty());
        assert_eq!(driver.history().count(), 2);
    }

    #[test]
    fn test_tick_scrolls_then_stops_at_boundary() {
        let (scheduler, mut driver) = attached();
        let mut viewport = ScrollViewport::new(100.0, 50.0).with_content(300.0, 50.0);
        viewport.scroll_to(170.0, 0.0);

        driver.start(ScrollDirection::Right, PERIOD);
        let timer = driver.timer().unwrap();

        let outcome = driver.tick(timer, &mut viewport, 10.0, 10.0);
        assert!(matches!(outcome, TickOutcome::Scrolled(flags) if flags.can_scroll_right));
        assert_eq!(viewport.scroll_left(), 180.0);

        driver.tick(timer, &mut viewport, 10.0, 10.0);
        assert_eq!(viewport.scroll_left(), 190.0);

        let outcome = driver.tick(timer, &mut viewport, 10.0, 10.0);
        assert!(matches!(outcome, TickOutcome::Stopped(flags) if !flags.can_scroll_right));
        assert_eq!(viewport.scroll_left(), 190.0);
        assert_eq!(driver.state(), AutoScrollState::Idle);
        assert!(scheduler.lock().unwrap().is_empty());

        // The old handle is dead now
        assert_eq!(
            driver.tick(timer, &mut viewport, 10.0, 10.0),
            TickOutcome::Ignored
        );
    }

    #[test]
    fn test_backward_directions_use_negative_steps() {
        let (_scheduler, mut driver) = attached();
        let mut viewport = ScrollViewport::new(100.0, 100.0).with_content(100.0, 400.0);
        viewport.scroll_to(0.0, 100.0);

        driver.start(ScrollDirection::Up, PERIOD);
        let timer = driver.timer().unwrap();
        driver.tick(timer, &mut viewport, 25.0, 10.0);
        assert_eq!(viewport.scroll_top(), 75.0);
    }

    #[test]
    fn test_drop_clears_interval() {
        let (scheduler, mut driver) = attached();
        driver.start(ScrollDirection::Left, PERIOD);
        drop(driver);
        assert!(scheduler.lock().unwrap().is_empty());
    }
}
