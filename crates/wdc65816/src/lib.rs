//! Emulates the WDC 65C816 CPU used in the SNES.
//!
//! The CPU does not own any memory. Everything it reads or writes goes through a [`Mem`]
//! implementation passed to [`Cpu::tick`], which is how the same core runs against the console
//! bus and against plain byte arrays in tests.

pub mod address;
pub mod addressing;
mod context;
pub mod error;
pub mod interrupts;
pub mod opcodes;
mod ops;
pub mod registers;
mod stack;
pub mod statusreg;
pub mod width;

use serde::{Deserialize, Serialize};

pub use self::{
    address::{Address, AddressError},
    addressing::AddressingMode,
    error::{BusError, CpuError},
    interrupts::{Interrupt, InterruptHandler},
    opcodes::{Mnemonic, Mode, OpcodeTable, Operation},
    ops::{add_with_carry, compare, subtract_with_borrow},
    registers::{Register, RegisterError, Registers},
    statusreg::StatusReg,
    width::Width,
};
use self::context::OpContext;

/// Byte-addressed 24-bit memory seen by the CPU.
pub trait Mem {
    fn load(&mut self, addr: Address) -> Result<u8, BusError>;
    fn store(&mut self, addr: Address, value: u8) -> Result<(), BusError>;
}

/// Everything needed to resume the CPU later. The opcode table is configuration, not state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    pub regs:       Registers,
    pub interrupts: InterruptHandler,
    pub cycles:     u64,
}

#[derive(Clone)]
pub struct Cpu {
    pub regs:       Registers,
    pub interrupts: InterruptHandler,
    opcodes:        OpcodeTable,
    /// Total cycles since power-on
    cycles:         u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-on state with a reset pending, so the first `tick` jumps through the RESET vector.
    pub fn new() -> Self {
        let mut interrupts = InterruptHandler::default();
        interrupts.request(Interrupt::Reset);
        Self { regs: Registers::power_on(), interrupts, opcodes: OpcodeTable::standard(), cycles: 0 }
    }

    /// Resets immediately instead of waiting for the next `tick`.
    pub fn reset<M: Mem>(&mut self, mem: &mut M) -> Result<(), CpuError> {
        let cy = interrupts::service(&mut self.regs, &mut self.interrupts, mem, Interrupt::Reset)?;
        self.cycles += cy as u64;
        log::info!("CPU reset, PC = {}", Address::new(self.regs.k, self.regs.pc));
        Ok(())
    }

    pub fn trigger_nmi(&mut self) {
        self.interrupts.request(Interrupt::Nmi);
    }

    pub fn trigger_irq(&mut self) {
        self.interrupts.request(Interrupt::Irq);
    }

    pub fn trigger_abort(&mut self) {
        self.interrupts.request(Interrupt::Abort);
    }

    pub fn trigger_reset(&mut self) {
        self.interrupts.request(Interrupt::Reset);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn opcodes(&self) -> &OpcodeTable {
        &self.opcodes
    }

    pub fn opcodes_mut(&mut self) -> &mut OpcodeTable {
        &mut self.opcodes
    }

    pub fn is_halted(&self) -> bool {
        self.interrupts.is_halted()
    }

    pub fn save_state(&self) -> CpuState {
        CpuState { regs: self.regs.clone(), interrupts: self.interrupts.clone(), cycles: self.cycles }
    }

    pub fn load_state(&mut self, state: &CpuState) {
        self.regs = state.regs.clone();
        self.interrupts = state.interrupts.clone();
        self.cycles = state.cycles;
    }

    /// Services at most one pending interrupt, then runs one instruction unless halted by `wai`
    /// or `stp`. Returns the cycles spent.
    pub fn tick<M: Mem>(&mut self, mem: &mut M) -> Result<u32, CpuError> {
        let mut cy = 0;
        if let Some(interrupt) = self.interrupts.poll(self.regs.p.irq_disable()) {
            cy += interrupts::service(&mut self.regs, &mut self.interrupts, mem, interrupt)?;
            log::debug!("Entered {interrupt:?} handler at {}", Address::new(self.regs.k, self.regs.pc));
        }

        if !self.interrupts.is_halted() {
            cy += self.dispatch(mem)?;
        }

        self.cycles += cy as u64;
        Ok(cy)
    }

    fn dispatch<M: Mem>(&mut self, mem: &mut M) -> Result<u32, CpuError> {
        let opaddr = Address::new(self.regs.k, self.regs.pc);
        let opcode = mem.load(opaddr)?;
        let op = self.opcodes.get(opcode).ok_or(CpuError::UnknownOpcode { opcode, address: opaddr })?;

        let mut ctx = OpContext::new(&mut self.regs, &mut self.interrupts, mem, opaddr, op);
        let am = AddressingMode::decode(&mut ctx)?;
        if log::log_enabled!(log::Level::Trace) {
            let instr = format!("{} {am}", op.mnemonic);
            log::trace!("{opaddr} {opcode:02X}  {:<16} {}", instr.trim_end(), ctx.regs);
        }

        ctx.regs.pc = opaddr.offset().wrapping_add(op.size(ctx.regs.p));
        ops::execute(&mut ctx, am)?;
        Ok(ctx.cy)
    }
}
