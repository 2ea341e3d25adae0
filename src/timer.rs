//! Elapsed-time counters driven by the poll loop.
//!
//! The [`TimerBank`] holds one always-running uptime counter and a few
//! stoppable counters. Every tick the caller passes the time that elapsed
//! since the previous tick to [`TimerBank::advance`], which adds it to every
//! running counter. Starting and stopping are idempotent: starting a running
//! timer or stopping a stopped one does nothing, and stopping a timer zeroes
//! its accumulator.

use crate::flags::{BitIndex, FlagSet, IndexOutOfRange, sealed};

/// Identifies a counter in the [`TimerBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Total uptime. Always running, cannot be stopped.
    Runtime,
    /// How long the lamps have been breathing in the current routine.
    LitDuration,
    /// How long the current press has been held.
    DebounceBuffer,
}

impl TimerId {
    /// Number of timer slots.
    pub const COUNT: usize = 3;

    /// Every timer, in slot order.
    pub const ALL: [TimerId; Self::COUNT] =
        [TimerId::Runtime, TimerId::LitDuration, TimerId::DebounceBuffer];

    /// Slot index of this timer.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl sealed::Sealed for TimerId {}

impl BitIndex for TimerId {
    #[inline]
    fn bit(self) -> u8 {
        self as u8
    }
}

impl TryFrom<usize> for TimerId {
    type Error = IndexOutOfRange;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        TimerId::ALL.get(index).copied().ok_or(IndexOutOfRange {
            index,
            capacity: TimerId::COUNT,
        })
    }
}

const _: () = assert!(TimerId::COUNT <= FlagSet::<TimerId>::CAPACITY);

/// Millisecond counters sharing one running mask.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerBank {
    counters: [u32; TimerId::COUNT],
    running: FlagSet<TimerId>,
}

impl TimerBank {
    /// Creates a bank with every counter at zero and only `Runtime` running.
    pub const fn new() -> Self {
        Self {
            counters: [0; TimerId::COUNT],
            running: FlagSet::new(),
        }
    }

    /// Adds `elapsed_millis` to `Runtime` and to every running timer.
    pub fn advance(&mut self, elapsed_millis: u32) {
        for id in TimerId::ALL {
            if self.is_running(id) {
                let counter = &mut self.counters[id.index()];
                *counter = counter.saturating_add(elapsed_millis);
            }
        }
    }

    /// Starts (`start == true`) or stops and zeroes (`start == false`) a timer.
    ///
    /// Returns `true` if the timer changed state. `Runtime` never changes.
    pub fn control(&mut self, id: TimerId, start: bool) -> bool {
        if id == TimerId::Runtime || self.running.get(id) == start {
            return false;
        }

        self.running.set(id, start);
        if !start {
            self.counters[id.index()] = 0;
        }
        true
    }

    /// Starts a timer. No-op if already running.
    #[inline]
    pub fn start(&mut self, id: TimerId) -> bool {
        self.control(id, true)
    }

    /// Stops and zeroes a timer. No-op if already stopped.
    #[inline]
    pub fn stop(&mut self, id: TimerId) -> bool {
        self.control(id, false)
    }

    /// Stops and immediately starts a timer, so it counts again from zero.
    pub fn restart(&mut self, id: TimerId) {
        self.stop(id);
        self.start(id);
    }

    /// Like [`control`](Self::control), addressing the timer by slot index.
    pub fn control_at(&mut self, index: usize, start: bool) -> Result<bool, IndexOutOfRange> {
        let id = TimerId::try_from(index)?;
        Ok(self.control(id, start))
    }

    /// Accumulated milliseconds of a timer.
    #[inline]
    pub fn elapsed(&self, id: TimerId) -> u32 {
        self.counters[id.index()]
    }

    /// Whether a timer is accumulating.
    #[inline]
    pub fn is_running(&self, id: TimerId) -> bool {
        id == TimerId::Runtime || self.running.get(id)
    }

    /// Uptime seen by the bank, i.e. the sum of all deltas fed to `advance`.
    #[inline]
    pub fn uptime(&self) -> u32 {
        self.elapsed(TimerId::Runtime)
    }

    /// Raw running mask. `Runtime` has no bit of its own.
    #[inline]
    pub fn running_mask(&self) -> u8 {
        self.running.bits()
    }
}

impl Default for TimerBank {
    fn default() -> Self {
        Self::new()
    }
}
