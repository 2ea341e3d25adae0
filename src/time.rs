//! Time abstraction for platform-agnostic timing.

/// Trait for abstracting the uptime clock.
///
/// Implement this on top of SysTick, a hardware timer, or anything else that
/// counts milliseconds since boot.
pub trait TimeSource {
    /// Milliseconds since boot. Must be monotonic until the device restarts.
    fn now_millis(&self) -> u32;
}
