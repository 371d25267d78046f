//! State handed to every instruction while it executes

use crate::{
    addressing::Operand,
    address::Address,
    error::CpuError,
    interrupts::InterruptHandler,
    opcodes::Operation,
    registers::Registers,
    stack::Stack,
    statusreg::StatusReg,
    width::Width,
    Mem,
};

/// Borrowed view of the CPU and bus for the duration of one instruction. Built on the stack at
/// every dispatch, so nothing here outlives a `tick`.
pub struct OpContext<'a, M: Mem> {
    pub regs:       &'a mut Registers,
    pub interrupts: &'a mut InterruptHandler,
    pub mem:        &'a mut M,
    /// Address of the opcode byte
    pub opaddr:     Address,
    pub op:         Operation,
    /// Cycles spent so far, starting at the table's base count
    pub cy:         u32,
}

impl<'a, M: Mem> OpContext<'a, M> {
    pub fn new(
        regs: &'a mut Registers,
        interrupts: &'a mut InterruptHandler,
        mem: &'a mut M,
        opaddr: Address,
        op: Operation,
    ) -> Self {
        Self { regs, interrupts, mem, opaddr, op, cy: op.cycles as u32 }
    }

    pub fn acc_width(&self) -> Width {
        self.regs.p.acc_width()
    }

    pub fn index_width(&self) -> Width {
        self.regs.p.index_width()
    }

    pub fn invalid_operand(&self) -> CpuError {
        CpuError::InvalidOperand { opcode: self.op.opcode, mode: self.op.mode }
    }

    /// Adds `cycles` when working on 16-bit data.
    pub fn word_penalty(&mut self, width: Width, cycles: u32) {
        if width.is_word() {
            self.cy += cycles;
        }
    }

    // ---------------------------------------------------------------------------------------------

    /// Byte `n` after the opcode. Operands never leave the program bank.
    pub fn operand_byte(&mut self, n: u16) -> Result<u8, CpuError> {
        self.loadb(self.opaddr.wrapping_add(1 + n))
    }

    pub fn operand_word(&mut self, n: u16) -> Result<u16, CpuError> {
        let lo = self.operand_byte(n)? as u16;
        let hi = self.operand_byte(n + 1)? as u16;
        Ok((hi << 8) | lo)
    }

    pub fn loadb(&mut self, addr: Address) -> Result<u8, CpuError> {
        Ok(self.mem.load(addr)?)
    }

    /// Little-endian word; the second byte wraps inside the bank.
    pub fn loadw(&mut self, addr: Address) -> Result<u16, CpuError> {
        let lo = self.loadb(addr)? as u16;
        let hi = self.loadb(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Three-byte pointer: offset followed by bank.
    pub fn load_long(&mut self, addr: Address) -> Result<Address, CpuError> {
        let offset = self.loadw(addr)?;
        let bank = self.loadb(addr.wrapping_add(2))?;
        Ok(Address::new(bank, offset))
    }

    pub fn load(&mut self, addr: Address, width: Width) -> Result<u16, CpuError> {
        match width {
            Width::Byte => self.loadb(addr).map(u16::from),
            Width::Word => self.loadw(addr),
        }
    }

    pub fn storeb(&mut self, addr: Address, value: u8) -> Result<(), CpuError> {
        Ok(self.mem.store(addr, value)?)
    }

    pub fn storew(&mut self, addr: Address, value: u16) -> Result<(), CpuError> {
        self.storeb(addr, value as u8)?;
        self.storeb(addr.wrapping_add(1), (value >> 8) as u8)
    }

    pub fn store(&mut self, addr: Address, width: Width, value: u16) -> Result<(), CpuError> {
        match width {
            Width::Byte => self.storeb(addr, value as u8),
            Width::Word => self.storew(addr, value),
        }
    }

    /// Reads a resolved operand. Immediates and A are truncated to `width`.
    pub fn read(&mut self, operand: Operand, width: Width) -> Result<u16, CpuError> {
        match operand {
            Operand::Accumulator => Ok(self.regs.a & width.mask()),
            Operand::Immediate(value) => Ok(value & width.mask()),
            Operand::Memory(addr) => self.load(addr, width),
        }
    }

    pub fn write(&mut self, operand: Operand, width: Width, value: u16) -> Result<(), CpuError> {
        match operand {
            Operand::Accumulator => {
                self.regs.a = width.merge(self.regs.a, value);
                Ok(())
            }
            Operand::Immediate(_) => Err(self.invalid_operand()),
            Operand::Memory(addr) => self.store(addr, width, value),
        }
    }

    pub fn stack(&mut self) -> Stack<'_, M> {
        Stack::new(&mut *self.regs, &mut *self.mem)
    }

    // ---------------------------------------------------------------------------------------------

    /// Replaces P. Emulation mode keeps M and X set, and switching to 8-bit index registers
    /// drops the high bytes of X and Y.
    pub fn set_p(&mut self, value: u8) {
        let mut p = StatusReg(value);
        if self.regs.emulation {
            p.set_small_acc(true);
            p.set_small_index(true);
        }
        self.regs.p = p;
        if p.small_index() {
            self.regs.x &= 0xFF;
            self.regs.y &= 0xFF;
        }
    }

    /// Switches between native and emulation mode, as done by `xce`.
    pub fn set_emulation(&mut self, emulation: bool) {
        self.regs.emulation = emulation;
        if emulation {
            self.regs.s = 0x0100 | (self.regs.s & 0xFF);
            self.set_p(self.regs.p.bits());
        }
    }
}
