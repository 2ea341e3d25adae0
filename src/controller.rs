//! Doorbell controller with state management and timing control.
//!
//! Provides [`Doorbell`], which owns the board I/O, the state flags and the
//! timer bank, and advances all of them once per [`Doorbell::tick`]. Nothing
//! in here blocks or sleeps; call `tick` from the main loop as often as you
//! like.

use crate::config::{
    BUTTON_ACTIVE_LEVEL, DEBOUNCE_MILLIS, LIT_DURATION_MILLIS, UPTIME_RESET_THRESHOLD_MILLIS,
};
use crate::event::{DoorbellEvent, TickReport};
use crate::flags::{FlagSet, StateFlag};
use crate::hardware::{BellButton, DoorbellIo, Lamp};
use crate::lamp::LampMode;
use crate::signal::BellSignal;
use crate::time::TimeSource;
use crate::timer::{TimerBank, TimerId};

/// Controls the door strike relay and indicator lamps from the bell buttons.
///
/// A tick runs these steps in order:
/// 1. Timing: restart the device if uptime passed the reset threshold,
///    otherwise feed the time since the last tick into the timer bank.
/// 2. Start routine: the first tick after power-on reports
///    [`DoorbellEvent::Started`].
/// 3. Ring routine: debounce the buttons, open the door once per press,
///    and return to idle once the lamps have been lit long enough.
/// 4. Lamp routine: write the breathing level to both lamps.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `H` - Board I/O implementation type
/// * `T` - Time source implementation type
pub struct Doorbell<'t, H: DoorbellIo, T: TimeSource> {
    io: H,
    time_source: &'t T,
    flags: FlagSet<StateFlag>,
    timers: TimerBank,
    relay: bool,
    lamp_levels: [u8; Lamp::ALL.len()],
    // Clock reading that counts as uptime zero
    epoch: u32,
}

impl<'t, H: DoorbellIo, T: TimeSource> Doorbell<'t, H, T> {
    /// Creates a controller in its power-on state: relay released, both lamps
    /// dark and the start routine pending.
    pub fn new(io: H, time_source: &'t T) -> Self {
        let mut doorbell = Self {
            io,
            time_source,
            flags: FlagSet::new(),
            timers: TimerBank::new(),
            relay: false,
            lamp_levels: [0; Lamp::ALL.len()],
            epoch: 0,
        };
        doorbell.power_on();
        doorbell
    }

    /// Runs one poll iteration and reports what happened.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::new();

        if !self.update_timings(&mut report) {
            return report;
        }

        if self.flags.get(StateFlag::Starting) {
            self.flags.set(StateFlag::Starting, false);
            report.push(DoorbellEvent::Started);
        }

        let held = self.is_any_button_pushed();
        self.step_ring_routine(held, &mut report);
        self.step_lamp_routine(held);

        #[cfg(feature = "defmt")]
        {
            if self.flags.get(StateFlag::DebugMode) {
                defmt::trace!(
                    "tick: held={=bool} flags={} timers={} events={}",
                    held,
                    self.flags,
                    self.timers,
                    report.events()
                );
            }
        }

        report
    }

    /// Returns `true` if any bell button is at its active level.
    pub fn is_any_button_pushed(&mut self) -> bool {
        BellButton::ALL
            .iter()
            .any(|&button| self.io.read_input(button) == BUTTON_ACTIVE_LEVEL)
    }

    /// Returns true when nothing is in progress: no routine, no pending start,
    /// relay released and both lamps dark.
    pub fn is_idle(&self) -> bool {
        !self.flags.get(StateFlag::Starting)
            && !self.flags.get(StateFlag::ButtonPushed)
            && !self.flags.get(StateFlag::RoutineActive)
            && !self.relay
            && self.lamp_levels.iter().all(|&level| level == 0)
    }

    /// Decides whether the main loop should tick now or may sleep.
    ///
    /// Always consumes a pending bell signal. Returns true if one was pending
    /// or the controller is not idle. The signal only wakes the loop; the
    /// buttons are still sampled by the tick itself.
    pub fn should_tick(&self, signal: &BellSignal) -> bool {
        let signalled = signal.take();
        signalled || !self.is_idle()
    }

    /// Samples the buttons and advances the debounce and door sequence.
    ///
    /// [`tick`](Self::tick) already calls this; use it directly only when
    /// driving timing yourself.
    pub fn ring_routine(&mut self) -> TickReport {
        let mut report = TickReport::new();
        let held = self.is_any_button_pushed();
        self.step_ring_routine(held, &mut report);
        report
    }

    /// Samples the buttons and writes the matching breathing level to the lamps.
    pub fn lamp_routine(&mut self) {
        let held = self.is_any_button_pushed();
        self.step_lamp_routine(held);
    }

    /// Returns the routine to idle: stops and zeroes the lit and debounce
    /// timers, clears the routine flags and releases the relay.
    ///
    /// Safe to call in any state, including idle. `DebugMode` is kept.
    pub fn reset_routine(&mut self) {
        self.timers.stop(TimerId::LitDuration);
        self.timers.stop(TimerId::DebounceBuffer);
        self.flags.set(StateFlag::ButtonPushed, false);
        self.flags.set(StateFlag::RoutineActive, false);
        self.flags.set(StateFlag::DoorOpen, false);
        self.flags.set(StateFlag::LampLit, false);
        self.set_relay(false);
    }

    /// Enables or disables per-tick trace logging.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.flags.set(StateFlag::DebugMode, enabled);
    }

    /// Returns a copy of the state flags.
    pub fn flags(&self) -> FlagSet<StateFlag> {
        self.flags
    }

    /// Returns a single state flag.
    pub fn flag(&self, flag: StateFlag) -> bool {
        self.flags.get(flag)
    }

    /// Returns the timer bank.
    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    /// Returns true while the door strike relay is energized.
    pub fn is_relay_energized(&self) -> bool {
        self.relay
    }

    /// Returns the level last written to a lamp.
    pub fn lamp_level(&self, lamp: Lamp) -> u8 {
        self.lamp_levels[lamp.index()]
    }

    /// Returns a reference to the board I/O.
    pub fn io(&self) -> &H {
        &self.io
    }

    /// Returns a mutable reference to the board I/O.
    pub fn io_mut(&mut self) -> &mut H {
        &mut self.io
    }

    /// Applies the uptime guard and advances the timer bank.
    ///
    /// Returns `false` if the device was restarted, in which case the rest of
    /// the tick must be skipped.
    fn update_timings(&mut self, report: &mut TickReport) -> bool {
        let clock = self.time_source.now_millis();
        let now = clock.wrapping_sub(self.epoch);

        if now > UPTIME_RESET_THRESHOLD_MILLIS {
            #[cfg(feature = "defmt")]
            defmt::info!("uptime {=u32} ms past reset threshold, restarting", now);

            self.io.restart_device();

            // Only reached if the restart returned; uptime counts from here
            self.power_on();
            self.epoch = clock;
            report.push(DoorbellEvent::DeviceRestart);
            return false;
        }

        let elapsed = now.saturating_sub(self.timers.uptime());
        self.timers.advance(elapsed);
        true
    }

    fn step_ring_routine(&mut self, held: bool, report: &mut TickReport) {
        if held {
            // One door opening per press
            if self.flags.get(StateFlag::DoorOpen) {
                return;
            }

            self.flags.set(StateFlag::ButtonPushed, true);
            self.flags.set(StateFlag::RoutineActive, true);
            self.timers.start(TimerId::LitDuration);
            if self.timers.start(TimerId::DebounceBuffer) {
                report.push(DoorbellEvent::PressDetected);
            }

            if self.timers.elapsed(TimerId::DebounceBuffer) > DEBOUNCE_MILLIS {
                self.open_door(report);
            }
            return;
        }

        if self.flags.get(StateFlag::DoorOpen) {
            #[cfg(feature = "defmt")]
            defmt::info!("button released, releasing door");

            self.flags.set(StateFlag::DoorOpen, false);
            self.set_relay(false);
            self.timers.restart(TimerId::LitDuration);
            report.push(DoorbellEvent::DoorReleased);
            return;
        }

        if self.timers.stop(TimerId::DebounceBuffer) {
            report.push(DoorbellEvent::PressDiscarded);
            if !self.flags.get(StateFlag::LampLit) {
                self.reset_routine();
                report.push(DoorbellEvent::RoutineReset);
            }
            return;
        }

        if self.flags.get(StateFlag::RoutineActive)
            && self.timers.elapsed(TimerId::LitDuration) > LIT_DURATION_MILLIS
        {
            #[cfg(feature = "defmt")]
            defmt::info!("lit duration over, routine reset");

            self.reset_routine();
            report.push(DoorbellEvent::RoutineReset);
        }
    }

    fn open_door(&mut self, report: &mut TickReport) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "door opened after {=u32} ms",
            self.timers.elapsed(TimerId::DebounceBuffer)
        );

        self.timers.stop(TimerId::DebounceBuffer);
        self.flags.set(StateFlag::DoorOpen, true);
        self.flags.set(StateFlag::LampLit, true);
        self.set_relay(true);
        report.push(DoorbellEvent::DoorOpened);
    }

    fn step_lamp_routine(&mut self, held: bool) {
        let mode = LampMode::select(held, self.flags.get(StateFlag::ButtonPushed));
        let level = mode.level(self.timers.elapsed(TimerId::LitDuration));

        for lamp in Lamp::ALL {
            // Update lamp only if level changed
            if self.lamp_levels[lamp.index()] != level {
                self.io.set_lamp(lamp, level);
                self.lamp_levels[lamp.index()] = level;
            }
        }
    }

    fn set_relay(&mut self, energized: bool) {
        if self.relay != energized {
            self.io.set_relay(energized);
            self.relay = energized;
        }
    }

    /// Puts every output and all state into the power-on configuration and
    /// arms the start routine.
    fn power_on(&mut self) {
        self.flags.clear();
        self.flags.set(StateFlag::Starting, true);
        self.timers = TimerBank::new();

        self.io.set_relay(false);
        self.relay = false;
        for lamp in Lamp::ALL {
            self.io.set_lamp(lamp, 0);
            self.lamp_levels[lamp.index()] = 0;
        }
    }
}
