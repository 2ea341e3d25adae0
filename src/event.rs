//! Events reported by a controller tick.

use heapless::Vec;

/// Maximum number of events one tick can produce.
pub const MAX_TICK_EVENTS: usize = 4;

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorbellEvent {
    /// First tick after power-on or a restart.
    Started,
    /// A button went down and the debounce timer started.
    PressDetected,
    /// The debounce expired; the relay is energized.
    DoorOpened,
    /// The button was let go after opening; the relay is released.
    DoorReleased,
    /// The button was let go before the debounce expired.
    PressDiscarded,
    /// The routine went back to idle.
    RoutineReset,
    /// The uptime threshold was hit and the device was restarted.
    DeviceRestart,
}

/// Events of a single tick, in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    events: Vec<DoorbellEvent, MAX_TICK_EVENTS>,
}

impl TickReport {
    /// Creates an empty report.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn push(&mut self, event: DoorbellEvent) {
        // A tick emits at most three events
        let pushed = self.events.push(event).is_ok();
        debug_assert!(pushed, "tick report full");
    }

    /// All recorded events.
    pub fn events(&self) -> &[DoorbellEvent] {
        &self.events
    }

    /// Whether `event` occurred during the tick.
    pub fn contains(&self, event: DoorbellEvent) -> bool {
        self.events.contains(&event)
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
