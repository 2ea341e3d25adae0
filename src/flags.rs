//! Named bit sets.
//!
//! [`FlagSet`] stores up to eight named booleans in one byte. It backs both the
//! application [`StateFlag`]s and the running mask of the timer bank.

use core::marker::PhantomData;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A type whose values name a bit position inside a [`FlagSet`].
///
/// Sealed: only the crate's own flag and timer enums name bits.
pub trait BitIndex: Copy + sealed::Sealed {
    /// Bit position, must be below [`FlagSet::CAPACITY`].
    fn bit(self) -> u8;
}

/// Raw bit index was outside the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndexOutOfRange {
    /// The rejected index.
    pub index: usize,
    /// Number of valid indices.
    pub capacity: usize,
}

impl core::fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "index {} out of range (capacity {})",
            self.index, self.capacity
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndexOutOfRange {}

/// Application state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateFlag {
    /// A press was detected and the routine has not been reset yet.
    ButtonPushed,
    /// The bell routine is running.
    RoutineActive,
    /// The door strike is energized for the current press.
    DoorOpen,
    /// The door was opened during this routine; lamps stay lit.
    LampLit,
    /// Verbose per-tick logging.
    DebugMode,
    /// Power-on start routine pending, cleared by the first tick.
    Starting,
}

const _: () = assert!((StateFlag::Starting as usize) < FlagSet::<StateFlag>::CAPACITY);

impl sealed::Sealed for StateFlag {}

impl BitIndex for StateFlag {
    #[inline]
    fn bit(self) -> u8 {
        self as u8
    }
}

/// Up to eight named boolean flags packed into one byte.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FlagSet<F: BitIndex> {
    bits: u8,
    _names: PhantomData<F>,
}

impl<F: BitIndex> FlagSet<F> {
    /// Number of addressable bits.
    pub const CAPACITY: usize = u8::BITS as usize;

    /// Creates a set with every bit cleared.
    pub const fn new() -> Self {
        Self {
            bits: 0,
            _names: PhantomData,
        }
    }

    /// Returns the named flag.
    #[inline]
    pub fn get(&self, flag: F) -> bool {
        self.bits & Self::named_mask(flag) != 0
    }

    /// Sets or clears the named flag, leaving all other bits untouched.
    #[inline]
    pub fn set(&mut self, flag: F, value: bool) {
        let mask = Self::named_mask(flag);
        if value {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    /// Reads bit `index`.
    pub fn get_bit(&self, index: usize) -> Result<bool, IndexOutOfRange> {
        let mask = Self::mask(index)?;
        Ok(self.bits & mask != 0)
    }

    /// Writes bit `index`.
    pub fn set_bit(&mut self, index: usize, value: bool) -> Result<(), IndexOutOfRange> {
        let mask = Self::mask(index)?;
        if value {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
        Ok(())
    }

    /// Raw bit pattern.
    #[inline]
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Mask of a named bit. A bit past the capacity maps to an empty mask,
    /// so it never aliases another flag.
    #[inline]
    fn named_mask(flag: F) -> u8 {
        let mask = Self::mask(usize::from(flag.bit()));
        debug_assert!(mask.is_ok(), "flag bit out of range");
        mask.unwrap_or(0)
    }

    fn mask(index: usize) -> Result<u8, IndexOutOfRange> {
        if index < Self::CAPACITY {
            Ok(1 << index)
        } else {
            Err(IndexOutOfRange {
                index,
                capacity: Self::CAPACITY,
            })
        }
    }
}

impl<F: BitIndex> Default for FlagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: BitIndex> core::fmt::Debug for FlagSet<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FlagSet({:#010b})", self.bits)
    }
}

#[cfg(feature = "defmt")]
impl<F: BitIndex> defmt::Format for FlagSet<F> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FlagSet({=u8:#b})", self.bits)
    }
}
