//! State Machine Runtime
//!
//! Flat, typed state machines for widget interaction states. A state type
//! describes its own transition table through [`StateTransitions`];
//! [`StateMachine`] owns the current state and a bounded transition history.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Maximum number of transitions kept in a machine's history
pub const HISTORY_LIMIT: usize = 64;

/// Trait for state types that know how to react to events
///
/// # Example
///
/// ```rust
/// use overflow_core::fsm::{StateMachine, StateTransitions};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Hover {
///     #[default]
///     Idle,
///     Hovered,
/// }
///
/// enum HoverEvent {
///     Enter,
///     Leave,
/// }
///
/// impl StateTransitions for Hover {
///     type Event = HoverEvent;
///
///     fn on_event(&self, event: &HoverEvent) -> Option<Self> {
///         match (self, event) {
///             (Hover::Idle, HoverEvent::Enter) => Some(Hover::Hovered),
///             (Hover::Hovered, HoverEvent::Leave) => Some(Hover::Idle),
///             _ => None,
///         }
///     }
/// }
///
/// let mut fsm = StateMachine::new(Hover::Idle);
/// fsm.send(&HoverEvent::Enter);
/// assert!(fsm.is_in(Hover::Hovered));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Events understood by this state type
    type Event;

    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: &Self::Event) -> Option<Self>;
}

/// A transition that was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub to: S,
}

impl<S: PartialEq> Transition<S> {
    /// True when the transition re-entered the state it left
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: VecDeque<Transition<S>>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<S>> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: &S::Event) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the transition taken (if any)
    pub fn send(&mut self, event: &S::Event) -> Option<Transition<S>> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        self.current_state = to;

        let transition = Transition { from, to };
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(transition);

        tracing::trace!("fsm transition {:?} -> {:?}", from, to);
        Some(transition)
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Press {
        #[default]
        Idle,
        Hovered,
        Pressed,
    }

    enum PressEvent {
        Enter,
        Leave,
        Down,
        Up,
    }

    impl StateTransitions for Press {
        type Event = PressEvent;

        fn on_event(&self, event: &PressEvent) -> Option<Self> {
            match (self, event) {
                (Press::Idle, PressEvent::Enter) => Some(Press::Hovered),
                (Press::Hovered, PressEvent::Leave) => Some(Press::Idle),
                (Press::Hovered, PressEvent::Down) => Some(Press::Pressed),
                (Press::Pressed, PressEvent::Up) => Some(Press::Hovered),
                (Press::Pressed, PressEvent::Leave) => Some(Press::Idle),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(Press::Idle);

        assert_eq!(fsm.current_state(), Press::Idle);

        fsm.send(&PressEvent::Enter);
        assert_eq!(fsm.current_state(), Press::Hovered);

        fsm.send(&PressEvent::Down);
        assert_eq!(fsm.current_state(), Press::Pressed);

        fsm.send(&PressEvent::Up);
        assert_eq!(fsm.current_state(), Press::Hovered);

        fsm.send(&PressEvent::Leave);
        assert_eq!(fsm.current_state(), Press::Idle);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::<Press>::default();

        // Down is not valid while idle
        assert!(fsm.send(&PressEvent::Down).is_none());
        assert_eq!(fsm.current_state(), Press::Idle);
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_can_send() {
        let fsm = StateMachine::new(Press::Idle);

        assert!(fsm.can_send(&PressEvent::Enter));
        assert!(!fsm.can_send(&PressEvent::Down));
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Press::Idle);

        fsm.send(&PressEvent::Enter);
        fsm.send(&PressEvent::Down);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0],
            Transition {
                from: Press::Idle,
                to: Press::Hovered
            }
        );
        assert_eq!(
            history[1],
            Transition {
                from: Press::Hovered,
                to: Press::Pressed
            }
        );

        fsm.clear_history();
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Press::Idle);

        for _ in 0..HISTORY_LIMIT {
            fsm.send(&PressEvent::Enter);
            fsm.send(&PressEvent::Leave);
        }

        assert_eq!(fsm.history().count(), HISTORY_LIMIT);
        let last = fsm.history().last().copied();
        assert_eq!(
            last,
            Some(Transition {
                from: Press::Hovered,
                to: Press::Idle
            })
        );
    }
}
