//! Overflow animation timing
//!
//! Frame-driven repeating intervals. Hosts advance the scheduler once per
//! frame and dispatch the `TIMER` events it returns.

pub mod scheduler;

pub use scheduler::{interval_period, SharedTimerScheduler, TimerEvents, TimerId, TimerScheduler};
