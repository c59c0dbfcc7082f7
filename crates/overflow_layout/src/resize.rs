//! Resize observation
//!
//! Widgets subscribe to size changes of a viewport's visible box. The host
//! polls the registry once per frame and dispatches the `RESIZE` events it
//! returns. A [`ResizeSubscription`] is an RAII guard: dropping it
//! unregisters the observation, so teardown cannot leak observers.

use std::sync::{Arc, Mutex, Weak};

use overflow_core::Event;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::viewport::{SharedViewport, Viewport};

new_key_type! {
    pub struct ObservationId;
}

/// Registry shared between a host and the widgets it mounts
pub type SharedResizeRegistry = Arc<Mutex<ResizeRegistry>>;

/// Events produced by a single poll
pub type ResizeEvents = SmallVec<[Event; 2]>;

struct Observation {
    /// Raw id of the widget to notify
    target: u64,
    viewport: Weak<Mutex<dyn Viewport + Send>>,
    last_size: (f32, f32),
}

/// All live resize observations
#[derive(Default)]
pub struct ResizeRegistry {
    observations: SlotMap<ObservationId, Observation>,
}

impl ResizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry wrapped for sharing
    pub fn shared() -> SharedResizeRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Observe `viewport` on behalf of widget `target`.
    ///
    /// Returns `None` only if the registry lock is poisoned.
    pub fn observe(
        registry: &SharedResizeRegistry,
        target: u64,
        viewport: &SharedViewport,
    ) -> Option<ResizeSubscription> {
        let last_size = viewport.lock().ok()?.client_size();
        let mut guard = registry.lock().ok()?;
        let id = guard.observations.insert(Observation {
            target,
            viewport: Arc::downgrade(viewport),
            last_size,
        });
        tracing::debug!("resize observation {:?} for widget {}", id, target);

        Some(ResizeSubscription {
            id,
            registry: Arc::downgrade(registry),
        })
    }

    /// Remove an observation. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: ObservationId) -> bool {
        let removed = self.observations.remove(id).is_some();
        if removed {
            tracing::debug!("resize observation {:?} released", id);
        }
        removed
    }

    pub fn is_observing(&self, id: ObservationId) -> bool {
        self.observations.contains_key(id)
    }

    /// Number of live observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Compare every observed viewport with its last known size and emit a
    /// `RESIZE` event for each change. Observations of dropped viewports are
    /// discarded.
    pub fn poll(&mut self) -> ResizeEvents {
        let mut events = ResizeEvents::new();
        let mut dead: SmallVec<[ObservationId; 2]> = SmallVec::new();

        for (id, observation) in self.observations.iter_mut() {
            let Some(viewport) = observation.viewport.upgrade() else {
                dead.push(id);
                continue;
            };
            let Ok(guard) = viewport.lock() else {
                continue;
            };
            let size = guard.client_size();
            if size != observation.last_size {
                observation.last_size = size;
                events.push(Event::resize(observation.target, size.0, size.1));
            }
        }

        for id in dead {
            self.observations.remove(id);
        }
        events
    }
}

/// Guard for a live observation; unregisters on drop
#[derive(Debug)]
pub struct ResizeSubscription {
    id: ObservationId,
    registry: Weak<Mutex<ResizeRegistry>>,
}

impl ResizeSubscription {
    pub fn id(&self) -> ObservationId {
        self.id
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut guard) = registry.lock() {
                guard.unobserve(self.id);
            }
        }
    }
}
