//! Build-time tunables.
//!
//! All durations are in milliseconds of uptime.

/// How long a button must be held before the door is opened.
pub const DEBOUNCE_MILLIS: u32 = 200;

/// How long the lamps keep breathing after the last button was released.
pub const LIT_DURATION_MILLIS: u32 = 10_000;

/// Breathing period while the routine is active but no button is held.
pub const BREATH_PERIOD_MILLIS: u32 = 2_000;

/// Breathing period while a button is held (0.3x the idle period).
pub const PRESSED_PERIOD_MILLIS: u32 = BREATH_PERIOD_MILLIS * 3 / 10;

/// Lowest analog level the breathing effect produces.
pub const MIN_ANALOG: u8 = 40;

/// Highest analog level the breathing effect produces.
pub const MAX_ANALOG: u8 = 255;

/// Uptime at which the device restarts itself.
///
/// Sits about 26 minutes below the `u32` wrap point so no elapsed-time
/// subtraction is ever performed across a rollover.
pub const UPTIME_RESET_THRESHOLD_MILLIS: u32 = 0xFFA0_0000;

/// Input level of a pressed button. The bell inputs are pulled up and
/// switched to ground.
pub const BUTTON_ACTIVE_LEVEL: bool = false;

const _: () = assert!(MIN_ANALOG < MAX_ANALOG);
const _: () = assert!(PRESSED_PERIOD_MILLIS > 0);
