//! The CPU's status register

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::width::Width;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReg(pub u8);

#[rustfmt::skip]
impl StatusReg {
    pub const NEGATIVE:    u8 = 0x80;
    pub const OVERFLOW:    u8 = 0x40;
    /// 1 = Accumulator is 8-bit (forced in emulation mode)
    pub const SMALL_ACC:   u8 = 0x20;
    /// 1 = Index registers X/Y are 8-bit (forced in emulation mode)
    pub const SMALL_INDEX: u8 = 0x10;
    /// Emulation mode only, shares the bit with `SMALL_INDEX`. Only exists on the stack copy.
    pub const BREAK:       u8 = 0x10;
    pub const DECIMAL:     u8 = 0x08;
    /// 1 = IRQs disabled
    pub const IRQ_DISABLE: u8 = 0x04;
    pub const ZERO:        u8 = 0x02;
    pub const CARRY:       u8 = 0x01;
}

#[rustfmt::skip]
impl StatusReg {
    /// Power-on pattern: 8-bit registers, IRQs disabled
    pub const fn new() -> StatusReg {
        StatusReg(Self::SMALL_ACC | Self::SMALL_INDEX | Self::IRQ_DISABLE)
    }

    pub fn bits(self) -> u8 { self.0 }

    pub fn negative(self) -> bool    { self.0 & Self::NEGATIVE != 0 }
    pub fn overflow(self) -> bool    { self.0 & Self::OVERFLOW != 0 }
    pub fn small_acc(self) -> bool   { self.0 & Self::SMALL_ACC != 0 }
    pub fn small_index(self) -> bool { self.0 & Self::SMALL_INDEX != 0 }
    pub fn decimal(self) -> bool     { self.0 & Self::DECIMAL != 0 }
    pub fn irq_disable(self) -> bool { self.0 & Self::IRQ_DISABLE != 0 }
    pub fn zero(self) -> bool        { self.0 & Self::ZERO != 0 }
    pub fn carry(self) -> bool       { self.0 & Self::CARRY != 0 }

    pub fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    pub fn set_negative(&mut self, value: bool)    { self.set(Self::NEGATIVE, value) }
    pub fn set_overflow(&mut self, value: bool)    { self.set(Self::OVERFLOW, value) }
    pub fn set_small_acc(&mut self, value: bool)   { self.set(Self::SMALL_ACC, value) }
    pub fn set_small_index(&mut self, value: bool) { self.set(Self::SMALL_INDEX, value) }
    pub fn set_decimal(&mut self, value: bool)     { self.set(Self::DECIMAL, value) }
    pub fn set_irq_disable(&mut self, value: bool) { self.set(Self::IRQ_DISABLE, value) }
    pub fn set_zero(&mut self, value: bool)        { self.set(Self::ZERO, value) }
    pub fn set_carry(&mut self, value: bool)       { self.set(Self::CARRY, value) }

    /// Width of A as selected by M
    pub fn acc_width(self) -> Width   { Width::from_small(self.small_acc()) }
    /// Width of X and Y as selected by X
    pub fn index_width(self) -> Width { Width::from_small(self.small_index()) }
}

impl StatusReg {
    /// Sets N and Z from `value` seen at `width`. Returns the value truncated to that width.
    pub fn set_nz(&mut self, value: u16, width: Width) -> u16 {
        let value = value & width.mask();
        self.set_zero(value == 0);
        self.set_negative(value & width.sign_bit() != 0);
        value
    }
}

impl Default for StatusReg {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatusReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (flag, c) in "NVMXDIZC".chars().enumerate() {
            let set = self.0 & (0x80 >> flag) != 0;
            write!(f, "{}", if set { c } else { '-' })?;
        }
        Ok(())
    }
}
