//! The register file

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::statusreg::StatusReg;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    A,
    X,
    Y,
    /// Direct page
    D,
    /// Stack pointer
    S,
    Pc,
    /// Data bank
    Dbr,
    /// Program bank
    K,
    P,
    /// Emulation mode bit, lives outside of P
    E,
}

impl Register {
    pub const ALL: [Register; 10] = [
        Register::A,
        Register::X,
        Register::Y,
        Register::D,
        Register::S,
        Register::Pc,
        Register::Dbr,
        Register::K,
        Register::P,
        Register::E,
    ];

    pub fn bits(self) -> u32 {
        match self {
            Register::A | Register::X | Register::Y | Register::D | Register::S | Register::Pc => 16,
            Register::Dbr | Register::K | Register::P => 8,
            Register::E => 1,
        }
    }

    pub fn max_value(self) -> u32 {
        (1 << self.bits()) - 1
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("Invalid value {value:#X} for register {register}")]
    InvalidValue { register: Register, value: u32 },
}

// -------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    pub a:         u16,
    pub x:         u16,
    pub y:         u16,
    /// Stack pointer
    pub s:         u16,
    /// Direct (page) register. Address offset for all instruction using "direct addressing" mode.
    pub d:         u16,
    /// Data bank register. Bank for all memory accesses.
    pub dbr:       u8,
    /// Program bank register. Opcodes are fetched from this bank.
    pub k:         u8,
    /// Program counter. K is not changed on pc overflow, so code can not span multiple banks
    /// (without `jml` or `jsl`).
    pub pc:        u16,
    pub p:         StatusReg,
    pub emulation: bool,
}

impl Registers {
    /// Values after power-on: emulation mode, 8-bit registers, stack in page 1.
    pub fn power_on() -> Self {
        Self {
            a:         0,
            x:         0,
            y:         0,
            s:         0x0100,
            d:         0,
            dbr:       0,
            k:         0,
            pc:        0,
            p:         StatusReg::new(),
            emulation: true,
        }
    }

    pub fn get(&self, register: Register) -> u32 {
        match register {
            Register::A => self.a as u32,
            Register::X => self.x as u32,
            Register::Y => self.y as u32,
            Register::D => self.d as u32,
            Register::S => self.s as u32,
            Register::Pc => self.pc as u32,
            Register::Dbr => self.dbr as u32,
            Register::K => self.k as u32,
            Register::P => self.p.0 as u32,
            Register::E => self.emulation as u32,
        }
    }

    /// Stores `value` as is. Values that don't fit the register are rejected; no width rules are
    /// applied here.
    pub fn set(&mut self, register: Register, value: u32) -> Result<(), RegisterError> {
        if value > register.max_value() {
            return Err(RegisterError::InvalidValue { register, value });
        }
        match register {
            Register::A => self.a = value as u16,
            Register::X => self.x = value as u16,
            Register::Y => self.y = value as u16,
            Register::D => self.d = value as u16,
            Register::S => self.s = value as u16,
            Register::Pc => self.pc = value as u16,
            Register::Dbr => self.dbr = value as u8,
            Register::K => self.k = value as u8,
            Register::P => self.p.0 = value as u8,
            Register::E => self.emulation = value != 0,
        }
        Ok(())
    }

    pub fn get_low(&self, register: Register) -> u8 {
        self.get(register) as u8
    }

    pub fn get_high(&self, register: Register) -> u8 {
        (self.get(register) >> 8) as u8
    }

    pub fn set_low(&mut self, register: Register, value: u8) -> Result<(), RegisterError> {
        let old = self.get(register);
        self.set(register, (old & !0xFF) | value as u32)
    }

    pub fn set_high(&mut self, register: Register, value: u8) -> Result<(), RegisterError> {
        let old = self.get(register);
        self.set(register, (old & 0xFF) | (value as u32) << 8)
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::power_on()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "a:{:04X} x:{:04X} y:{:04X} s:{:04X} d:{:04X} dbr:{:02X} emu:{} {}",
            self.a, self.x, self.y, self.s, self.d, self.dbr, self.emulation as u8, self.p
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_views_of_16_bit_registers() {
        let mut regs = Registers::power_on();
        regs.set(Register::A, 0x1234).unwrap();
        assert_eq!(regs.get_low(Register::A), 0x34);
        assert_eq!(regs.get_high(Register::A), 0x12);

        regs.set_high(Register::X, 0xAB).unwrap();
        regs.set_low(Register::X, 0xCD).unwrap();
        assert_eq!(regs.x, 0xABCD);
    }

    #[test]
    fn rejects_values_wider_than_the_register() {
        let mut regs = Registers::power_on();
        assert_eq!(
            regs.set(Register::Dbr, 0x100),
            Err(RegisterError::InvalidValue { register: Register::Dbr, value: 0x100 })
        );
        assert!(regs.set(Register::Pc, 0x1_0000).is_err());
        assert!(regs.set(Register::E, 2).is_err());
        assert!(regs.set_high(Register::K, 0x01).is_err());
        assert_eq!(regs.dbr, 0);
    }

    #[test]
    fn every_register_round_trips_its_maximum() {
        let mut regs = Registers::power_on();
        for register in Register::ALL {
            regs.set(register, register.max_value()).unwrap();
            assert_eq!(regs.get(register), register.max_value(), "{register}");
        }
    }

    #[test]
    fn trace_format() {
        let regs = Registers::power_on();
        assert_eq!(regs.to_string(), "a:0000 x:0000 y:0000 s:0100 d:0000 dbr:00 emu:1 --MX-I--");
    }
}
