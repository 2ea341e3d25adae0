//! Shared test infrastructure for doorbell-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use doorbell_controller::config::BUTTON_ACTIVE_LEVEL;
use doorbell_controller::{BellButton, DoorbellIo, Lamp, TimeSource};

// ============================================================================
// Mock Board I/O
// ============================================================================

/// Mock board that records every output write
pub struct MockIo {
    inputs: [bool; 5],
    relay: bool,
    relay_history: heapless::Vec<bool, 32>,
    lamps: [u8; 2],
    lamp_writes: usize,
    restarts: usize,
}

impl MockIo {
    pub fn new() -> Self {
        Self {
            inputs: [!BUTTON_ACTIVE_LEVEL; 5],
            relay: false,
            relay_history: heapless::Vec::new(),
            lamps: [0; 2],
            lamp_writes: 0,
            restarts: 0,
        }
    }

    /// Press (or release) a button
    pub fn set_pressed(&mut self, button: BellButton, pressed: bool) {
        self.inputs[button as usize] = if pressed {
            BUTTON_ACTIVE_LEVEL
        } else {
            !BUTTON_ACTIVE_LEVEL
        };
    }

    pub fn release_all(&mut self) {
        self.inputs = [!BUTTON_ACTIVE_LEVEL; 5];
    }

    pub fn relay(&self) -> bool {
        self.relay
    }

    pub fn relay_history(&self) -> &[bool] {
        &self.relay_history
    }

    /// Number of times the relay was switched on
    pub fn relay_activations(&self) -> usize {
        self.relay_history.iter().filter(|&&on| on).count()
    }

    pub fn lamp(&self, lamp: Lamp) -> u8 {
        self.lamps[lamp as usize]
    }

    pub fn lamp_writes(&self) -> usize {
        self.lamp_writes
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl DoorbellIo for MockIo {
    fn read_input(&mut self, button: BellButton) -> bool {
        self.inputs[button as usize]
    }

    fn set_relay(&mut self, energized: bool) {
        self.relay = energized;
        let _ = self.relay_history.push(energized);
    }

    fn set_lamp(&mut self, lamp: Lamp, level: u8) {
        self.lamps[lamp as usize] = level;
        self.lamp_writes += 1;
    }

    fn restart_device(&mut self) {
        self.restarts += 1;
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(0),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a
    /// hardware counter
    pub fn advance(&self, millis: u32) {
        self.current_time
            .set(self.current_time.get().wrapping_add(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(millis);
    }
}

impl TimeSource for MockTimeSource {
    fn now_millis(&self) -> u32 {
        self.current_time.get()
    }
}
