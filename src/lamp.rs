//! Breathing effect for the indicator lamps.

use crate::config::{BREATH_PERIOD_MILLIS, MAX_ANALOG, MIN_ANALOG, PRESSED_PERIOD_MILLIS};

/// Computes the lamp level for a triangular breathing pulse.
///
/// Within each `period_millis` the level ramps linearly from [`MIN_ANALOG`]
/// up to [`MAX_ANALOG`] over the first half and back down over the second
/// half. The result is periodic in `period_millis` and symmetric around the
/// half period, without a jump at the wrap.
///
/// A zero period yields [`MIN_ANALOG`].
pub fn analog_level(elapsed_millis: u32, period_millis: u32) -> u8 {
    if period_millis == 0 {
        return MIN_ANALOG;
    }

    let period = u64::from(period_millis);
    let in_period = u64::from(elapsed_millis) % period;

    // Distance from the nearest period boundary, 0..=period/2
    let distance = if in_period * 2 < period {
        in_period
    } else {
        period - in_period
    };

    let range = u64::from(MAX_ANALOG - MIN_ANALOG);
    let offset = distance * 2 * range / period;
    MIN_ANALOG + offset as u8
}

/// Which breathing speed drives the lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LampMode {
    /// Lamps dark.
    Off,
    /// Slow breathing after the button was released.
    Breathing,
    /// Fast breathing while a button is held.
    Pressed,
}

impl LampMode {
    /// Picks the mode from the live button state and the routine's
    /// `ButtonPushed` flag. A held button always wins.
    pub fn select(held_now: bool, routine_pushed: bool) -> Self {
        if held_now {
            LampMode::Pressed
        } else if routine_pushed {
            LampMode::Breathing
        } else {
            LampMode::Off
        }
    }

    /// Breathing period for this mode, `None` when dark.
    pub fn period_millis(self) -> Option<u32> {
        match self {
            LampMode::Off => None,
            LampMode::Breathing => Some(BREATH_PERIOD_MILLIS),
            LampMode::Pressed => Some(PRESSED_PERIOD_MILLIS),
        }
    }

    /// Level for both lamps at `elapsed_millis` into the lit phase.
    pub fn level(self, elapsed_millis: u32) -> u8 {
        match self.period_millis() {
            Some(period) => analog_level(elapsed_millis, period),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_floor_and_peaks_at_half_period() {
        assert_eq!(analog_level(0, 1000), MIN_ANALOG);
        assert_eq!(analog_level(500, 1000), MAX_ANALOG);
        assert_eq!(analog_level(1000, 1000), MIN_ANALOG);
    }

    #[test]
    fn quarter_period_is_midway() {
        let quarter = analog_level(250, 1000);
        let mid = MIN_ANALOG as u32 + (MAX_ANALOG - MIN_ANALOG) as u32 / 2;
        assert!((quarter as i32 - mid as i32).abs() <= 1);
    }

    #[test]
    fn zero_period_yields_floor() {
        assert_eq!(analog_level(1234, 0), MIN_ANALOG);
    }

    #[test]
    fn odd_period_stays_in_range() {
        for elapsed in 0..21 {
            let level = analog_level(elapsed, 7);
            assert!((MIN_ANALOG..=MAX_ANALOG).contains(&level));
        }
    }

    #[test]
    fn mode_selection_prefers_held_button() {
        assert_eq!(LampMode::select(true, true), LampMode::Pressed);
        assert_eq!(LampMode::select(true, false), LampMode::Pressed);
        assert_eq!(LampMode::select(false, true), LampMode::Breathing);
        assert_eq!(LampMode::select(false, false), LampMode::Off);
    }

    #[test]
    fn pressed_mode_breathes_faster() {
        let pressed = LampMode::Pressed.period_millis().unwrap();
        let idle = LampMode::Breathing.period_millis().unwrap();
        assert!(pressed < idle);
        assert_eq!(LampMode::Off.level(123), 0);
        assert_eq!(LampMode::Pressed.level(pressed / 2), MAX_ANALOG);
    }
}
