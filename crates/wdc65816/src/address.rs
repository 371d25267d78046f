//! 24-bit bus addresses

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address {0:#X} is outside of the 24-bit address space")]
    OutOfRange(u32),
    #[error("Bank {0:#X} does not fit in 8 bits")]
    Bank(u32),
    #[error("Offset {0:#X} does not fit in 16 bits")]
    Offset(u32),
}

// -------------------------------------------------------------------------------------------------

/// A `(bank, offset)` pair. All arithmetic on the offset stays inside the bank; crossing into the
/// next bank has to be requested explicitly with [`Address::wrapping_add_long`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address {
    bank:   u8,
    offset: u16,
}

pub const MASK_BB: u32 = 0xFF0000;
pub const MASK_HH: u32 = 0x00FF00;
pub const MASK_DD: u32 = 0x0000FF;

impl Address {
    pub const fn new(bank: u8, offset: u16) -> Self {
        Self { bank, offset }
    }

    /// Builds an address out of unchecked parts, e.g. values read from an external source.
    pub fn from_parts(bank: u32, offset: u32) -> Result<Self, AddressError> {
        if bank > 0xFF {
            Err(AddressError::Bank(bank))
        } else if offset > 0xFFFF {
            Err(AddressError::Offset(offset))
        } else {
            Ok(Self::new(bank as u8, offset as u16))
        }
    }

    pub const fn bank(self) -> u8 {
        self.bank
    }

    pub const fn offset(self) -> u16 {
        self.offset
    }

    pub const fn high(self) -> u8 {
        (self.offset >> 8) as u8
    }

    pub const fn low(self) -> u8 {
        self.offset as u8
    }

    /// Canonical `0xBBHHDD` form.
    pub const fn to_u24(self) -> u32 {
        (self.bank as u32) << 16 | self.offset as u32
    }

    #[must_use]
    pub const fn with_bank(self, bank: u8) -> Self {
        Self { bank, ..self }
    }

    #[must_use]
    pub const fn with_offset(self, offset: u16) -> Self {
        Self { offset, ..self }
    }

    /// Moves the offset, wrapping inside the current bank.
    #[must_use]
    pub const fn wrapping_add(self, n: u16) -> Self {
        self.with_offset(self.offset.wrapping_add(n))
    }

    /// Moves through the whole 24-bit space, carrying into the bank.
    #[must_use]
    pub const fn wrapping_add_long(self, n: u32) -> Self {
        let raw = self.to_u24().wrapping_add(n) & (MASK_BB | MASK_HH | MASK_DD);
        Self::new((raw >> 16) as u8, raw as u16)
    }
}

impl TryFrom<u32> for Address {
    type Error = AddressError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value & !(MASK_BB | MASK_HH | MASK_DD) != 0 {
            Err(AddressError::OutOfRange(value))
        } else {
            Ok(Self::new((value >> 16) as u8, value as u16))
        }
    }
}

impl From<Address> for u32 {
    fn from(addr: Address) -> Self {
        addr.to_u24()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${:02X}:{:04X}", self.bank, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_bank_and_offset() {
        let addr = Address::new(0x7E, 0x1234);
        assert_eq!(addr.to_u24(), 0x7E1234);
        assert_eq!(Address::try_from(0x7E1234), Ok(addr));
        assert_eq!((addr.bank(), addr.high(), addr.low()), (0x7E, 0x12, 0x34));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(Address::try_from(0x0100_0000), Err(AddressError::OutOfRange(0x0100_0000)));
        assert_eq!(Address::from_parts(0x100, 0), Err(AddressError::Bank(0x100)));
        assert_eq!(Address::from_parts(0, 0x10000), Err(AddressError::Offset(0x10000)));
    }

    #[test]
    fn offset_arithmetic_stays_in_bank() {
        let addr = Address::new(0x12, 0xFFFF);
        assert_eq!(addr.wrapping_add(1), Address::new(0x12, 0x0000));
        assert_eq!(addr.wrapping_add_long(1), Address::new(0x13, 0x0000));
        assert_eq!(Address::new(0xFF, 0xFFFF).wrapping_add_long(1), Address::new(0x00, 0x0000));
    }

    #[test]
    fn displays_as_bank_and_offset() {
        assert_eq!(Address::new(0x00, 0x8000).to_string(), "$00:8000");
    }
}
