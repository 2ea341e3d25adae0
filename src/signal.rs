//! Wake hint from the bell-signal line.
//!
//! The board has an edge-triggered bell line next to the button inputs. Its
//! interrupt handler calls [`BellSignal::notify`]; the main loop asks
//! [`Doorbell::should_tick`](crate::Doorbell::should_tick) whether it may go
//! back to sleep. The signal is only a hint: button state and elapsed time
//! always come from the tick itself.

use core::cell::Cell;
use critical_section::Mutex;

/// Latch shared between the bell-signal interrupt and the main loop.
///
/// Meant to live in a `static`:
///
/// ```rust,ignore
/// static BELL: BellSignal = BellSignal::new();
///
/// #[interrupt]
/// fn EXTI2_3() {
///     BELL.notify();
/// }
/// ```
pub struct BellSignal {
    pending: Mutex<Cell<bool>>,
}

impl BellSignal {
    /// Creates a latch with nothing pending.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Marks the bell line as triggered. Safe to call from interrupt context.
    pub fn notify(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Returns whether the line was triggered since the last call and clears
    /// the latch.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).replace(false))
    }

    /// Returns whether the line was triggered, without clearing the latch.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }
}

impl Default for BellSignal {
    fn default() -> Self {
        Self::new()
    }
}
