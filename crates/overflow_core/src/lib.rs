//! Overflow Core Runtime
//!
//! Foundational primitives shared by the overflow widget crates:
//!
//! - **Events**: host-agnostic pointer, scroll, resize and timer events
//! - **State Machines**: typed, flat state machines for interaction states
//! - **Geometry**: scroll axes and directions

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{event_types, Event, EventData, EventType};
pub use fsm::{StateMachine, StateTransitions, Transition};
pub use geometry::{Axis, ParseDirectionError, ScrollDirection};
