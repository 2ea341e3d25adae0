//! Hardware abstraction for the doorbell board.

/// The bell buttons wired to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BellButton {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl BellButton {
    /// Every button, in wiring order.
    pub const ALL: [BellButton; 5] = [
        BellButton::One,
        BellButton::Two,
        BellButton::Three,
        BellButton::Four,
        BellButton::Five,
    ];
}

/// The two indicator lamp outputs. Both always show the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    /// Signal lamp next to the bell panel.
    Signal,
    /// Test lamp on the controller board.
    Test,
}

impl Lamp {
    /// Both lamps.
    pub const ALL: [Lamp; 2] = [Lamp::Signal, Lamp::Test];

    /// Index into per-lamp arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Trait for abstracting the doorbell board I/O.
///
/// Implement this for your pins (GPIO inputs, relay GPIO, PWM channels) so the
/// controller can drive them. Implementations handle hardware errors
/// internally; none of these methods can fail.
pub trait DoorbellIo {
    /// Raw logic level of a button input.
    fn read_input(&mut self, button: BellButton) -> bool;

    /// Energizes or releases the door strike relay.
    fn set_relay(&mut self, energized: bool);

    /// Writes a PWM duty value (0-255) to a lamp.
    fn set_lamp(&mut self, lamp: Lamp, level: u8);

    /// Resets the whole device.
    ///
    /// On hardware this does not return. If it does (simulation, tests), the
    /// controller reinitializes itself as after power-on.
    fn restart_device(&mut self);
}
