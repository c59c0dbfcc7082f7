//! Interval scheduler
//!
//! Manages repeating intervals and turns elapsed frame time into `TIMER`
//! events addressed to the widget that owns each interval. The scheduler never
//! calls back into widgets itself: the host drains the returned events and
//! dispatches them after releasing the scheduler, so a widget may freely
//! clear its own interval while handling a tick.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use overflow_core::Event;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TimerId;
}

impl TimerId {
    /// Raw handle carried in `EventData::Timer`
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Scheduler shared between a host and the widgets it mounts
pub type SharedTimerScheduler = Arc<Mutex<TimerScheduler>>;

/// Events produced by a single `advance`
pub type TimerEvents = SmallVec<[Event; 4]>;

/// Convert a period in milliseconds to a `Duration`.
///
/// Non-positive and NaN periods become zero; a zero-period interval fires
/// once per scheduler advance.
pub fn interval_period(ms: f32) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    let nanos = (f64::from(ms) * 1_000_000.0).round();
    if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos as u64)
    }
}

struct Interval {
    owner: u64,
    period: Duration,
    /// Time accumulated since the last fire
    elapsed: Duration,
}

/// The scheduler that tracks all active intervals
pub struct TimerScheduler {
    timers: SlotMap<TimerId, Interval>,
    /// Total time advanced so far
    clock: Duration,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            clock: Duration::ZERO,
        }
    }

    /// Create a scheduler wrapped for sharing
    pub fn shared() -> SharedTimerScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Start a repeating interval owned by the widget with raw id `owner`
    pub fn set_interval(&mut self, owner: u64, period: Duration) -> TimerId {
        let id = self.timers.insert(Interval {
            owner,
            period,
            elapsed: Duration::ZERO,
        });
        tracing::debug!("interval {:?} started, period={:?}", id, period);
        id
    }

    /// Cancel an interval. Returns false if it was not active.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            tracing::debug!("interval {:?} cleared", id);
        }
        removed
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of running intervals
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Total time advanced since creation
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Advance time by `dt` and collect the resulting timer events.
    ///
    /// Each interval fires once per whole period elapsed, in order.
    pub fn advance(&mut self, dt: Duration) -> TimerEvents {
        self.clock = self.clock.saturating_add(dt);
        let timestamp = self.clock.as_millis() as u64;

        let mut fired = TimerEvents::new();
        for (id, interval) in self.timers.iter_mut() {
            if interval.period.is_zero() {
                fired.push(Event::timer(interval.owner, id.to_raw()).at(timestamp));
                continue;
            }

            interval.elapsed = interval.elapsed.saturating_add(dt);
            while interval.elapsed >= interval.period {
                interval.elapsed -= interval.period;
                fired.push(Event::timer(interval.owner, id.to_raw()).at(timestamp));
            }
        }

        if !fired.is_empty() {
            tracing::trace!("{} timer event(s) at {}ms", fired.len(), timestamp);
        }
        fired
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overflow_core::{event_types, EventData};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_interval_period_conversion() {
        assert_eq!(interval_period(10.0), ms(10));
        assert_eq!(interval_period(0.5), Duration::from_micros(500));
        assert_eq!(interval_period(0.0), Duration::ZERO);
        assert_eq!(interval_period(-25.0), Duration::ZERO);
        assert_eq!(interval_period(f32::NAN), Duration::ZERO);
        assert_eq!(interval_period(f32::MAX), Duration::MAX);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.set_interval(3, ms(10));

        assert!(scheduler.advance(ms(9)).is_empty());

        let fired = scheduler.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].event_type, event_types::TIMER);
        assert_eq!(fired[0].target, 3);
        assert_eq!(fired[0].data, EventData::Timer { timer: id.to_raw() });
        assert_eq!(fired[0].timestamp, 10);

        // A long frame catches up on every missed period
        assert_eq!(scheduler.advance(ms(35)).len(), 3);
        assert_eq!(scheduler.advance(ms(5)).len(), 1);
    }

    #[test]
    fn test_zero_period_fires_every_advance() {
        let mut scheduler = TimerScheduler::new();
        scheduler.set_interval(1, Duration::ZERO);

        assert_eq!(scheduler.advance(ms(1)).len(), 1);
        assert_eq!(scheduler.advance(ms(100)).len(), 1);
    }

    #[test]
    fn test_clear_interval() {
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.set_interval(1, ms(10));
        assert!(scheduler.is_active(id));
        assert_eq!(scheduler.active_count(), 1);

        assert!(scheduler.clear_interval(id));
        assert!(!scheduler.is_active(id));
        assert!(scheduler.is_empty());
        assert!(scheduler.advance(ms(50)).is_empty());

        // Clearing twice is harmless
        assert!(!scheduler.clear_interval(id));
    }

    #[test]
    fn test_raw_handle_round_trip() {
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.set_interval(1, ms(10));
        assert_eq!(TimerId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn test_stale_handle_not_reused() {
        let mut scheduler = TimerScheduler::new();
        let first = scheduler.set_interval(1, ms(10));
        scheduler.clear_interval(first);
        let second = scheduler.set_interval(1, ms(10));

        // Slot may be reused, but the versioned key must differ
        assert_ne!(first, second);
        assert!(!scheduler.is_active(first));
    }
}
