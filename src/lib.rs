#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Doorbell`**: The controller. Owns the I/O and all state, advanced by `tick()`
//! - **`FlagSet`**: Up to eight named booleans in one byte, indexed by a `BitIndex` enum
//! - **`StateFlag`**: Application flags (button pushed, routine active, door open, lamp lit, debug, starting)
//! - **`TimerBank`**: Uptime plus stoppable millisecond counters sharing one running mask
//! - **`TimerId`**: Names a counter in the timer bank
//! - **`analog_level`**: Triangular breathing curve between `MIN_ANALOG` and `MAX_ANALOG`
//! - **`DoorbellIo`**: Trait to implement for your board's buttons, relay, lamps and reset
//! - **`TimeSource`**: Trait to implement for your millisecond uptime clock
//! - **`TickReport`**: Events produced by a single tick
//! - **`BellSignal`**: Interrupt-safe wake hint from the bell-signal line
//!
//! All tunables live in [`config`] and are fixed at build time.

pub mod config;
pub mod controller;
pub mod event;
pub mod flags;
pub mod hardware;
pub mod lamp;
pub mod signal;
pub mod time;
pub mod timer;

pub use controller::Doorbell;
pub use event::{DoorbellEvent, TickReport};
pub use flags::{BitIndex, FlagSet, IndexOutOfRange, StateFlag};
pub use hardware::{BellButton, DoorbellIo, Lamp};
pub use lamp::{LampMode, analog_level};
pub use signal::BellSignal;
pub use time::TimeSource;
pub use timer::{TimerBank, TimerId};
