use crate::{address::Address, error::BusError, registers::Registers, Mem};

/// The hardware stack in bank 0, growing downwards from S. In emulation mode S stays inside
/// page 0x01.
pub struct Stack<'a, M: Mem> {
    regs: &'a mut Registers,
    mem:  &'a mut M,
}

impl<'a, M: Mem> Stack<'a, M> {
    pub fn new(regs: &'a mut Registers, mem: &'a mut M) -> Self {
        Self { regs, mem }
    }

    fn step(&mut self, down: bool) {
        let s = self.regs.s;
        if self.regs.emulation {
            let low = if down { (s as u8).wrapping_sub(1) } else { (s as u8).wrapping_add(1) };
            self.regs.s = 0x0100 | low as u16;
        } else if down {
            self.regs.s = s.wrapping_sub(1);
        } else {
            self.regs.s = s.wrapping_add(1);
        }
    }

    /// Pushes a byte onto the stack and decrements the stack pointer
    pub fn push_byte(&mut self, value: u8) -> Result<(), BusError> {
        self.mem.store(Address::new(0, self.regs.s), value)?;
        self.step(true);
        Ok(())
    }

    /// High byte first, so the word ends up little-endian in memory
    pub fn push_word(&mut self, value: u16) -> Result<(), BusError> {
        self.push_byte((value >> 8) as u8)?;
        self.push_byte(value as u8)
    }

    pub fn pull_byte(&mut self) -> Result<u8, BusError> {
        self.step(false);
        self.mem.load(Address::new(0, self.regs.s))
    }

    pub fn pull_word(&mut self) -> Result<u16, BusError> {
        let lo = self.pull_byte()? as u16;
        let hi = self.pull_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    pub fn push(&mut self, value: u16, width: crate::width::Width) -> Result<(), BusError> {
        if width.is_word() {
            self.push_word(value)
        } else {
            self.push_byte(value as u8)
        }
    }

    pub fn pull(&mut self, width: crate::width::Width) -> Result<u16, BusError> {
        if width.is_word() {
            self.pull_word()
        } else {
            self.pull_byte().map(u16::from)
        }
    }
}
