//! Processor status register (P).
//!
//! ```text
//!  7 6 5 4 3 2 1 0
//!  N V - B D I Z C
//! ```
//!
//! All eight bits live in one byte. Break and Unused have no storage on the
//! real chip: Unused always reads as 1, and Break only exists in the copy
//! of P pushed to the stack.

/// A status bit, named by its meaning. The discriminant is the bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Carry out of bit 7, or "no borrow" after a subtraction.
    Carry = 0,
    /// Result was zero.
    Zero = 1,
    /// IRQ requests are ignored while set.
    InterruptDisable = 2,
    /// ADC/SBC use BCD arithmetic while set (on variants that support it).
    Decimal = 3,
    /// Set in the pushed copy of P by BRK/PHP, clear for IRQ/NMI.
    Break = 4,
    /// Always reads as 1.
    Unused = 5,
    /// Signed overflow.
    Overflow = 6,
    /// Bit 7 of the result.
    Negative = 7,
}

impl Flag {
    /// All flags, lowest bit first.
    pub const ALL: [Flag; 8] = [
        Flag::Carry,
        Flag::Zero,
        Flag::InterruptDisable,
        Flag::Decimal,
        Flag::Break,
        Flag::Unused,
        Flag::Overflow,
        Flag::Negative,
    ];

    /// Single-bit mask for this flag.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Processor status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u8);

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    /// Status after reset: Unused and InterruptDisable set ($24).
    pub const RESET: Self = Self(0x24);

    /// Create a status register with only the unused bit set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Flag::Unused.mask())
    }

    /// Create status from a raw value, forcing the unused bit on.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self(value | Flag::Unused.mask())
    }

    /// Status as seen by a pull (PLP/RTI): Break has no storage, so it is
    /// dropped; Unused is forced on.
    #[must_use]
    pub const fn from_pulled(value: u8) -> Self {
        Self((value | Flag::Unused.mask()) & !Flag::Break.mask())
    }

    /// Raw register value. Unused always reads as 1.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0 | Flag::Unused.mask()
    }

    /// The byte pushed to the stack: Unused set, Break set for a software
    /// break (BRK/PHP) and clear for a hardware interrupt.
    #[must_use]
    pub const fn pushed(self, software: bool) -> u8 {
        let byte = self.0 | Flag::Unused.mask();
        if software {
            byte | Flag::Break.mask()
        } else {
            byte & !Flag::Break.mask()
        }
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn get(self, flag: Flag) -> bool {
        self.bits() & flag.mask() != 0
    }

    /// Set or clear a flag.
    pub fn set(&mut self, flag: Flag, value: bool) {
        if value {
            self.0 |= flag.mask();
        } else {
            self.0 &= !flag.mask();
        }
    }

    /// Update N and Z from a result byte.
    pub fn update_nz(&mut self, value: u8) {
        self.set(Flag::Zero, value == 0);
        self.set(Flag::Negative, value & 0x80 != 0);
    }
}
