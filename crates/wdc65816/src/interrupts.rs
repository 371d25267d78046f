//! Pending interrupt bookkeeping and the vector sequence

use serde::{Deserialize, Serialize};

use crate::{
    address::Address,
    error::BusError,
    registers::Registers,
    stack::Stack,
    statusreg::StatusReg,
    Mem,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interrupt {
    Reset,
    Nmi,
    Abort,
    Irq,
    /// Raised by the `brk` instruction
    Brk,
    /// Raised by the `cop` instruction
    Cop,
}

impl Interrupt {
    /// Highest priority first
    pub const PRIORITY: [Interrupt; 6] =
        [Interrupt::Reset, Interrupt::Nmi, Interrupt::Abort, Interrupt::Irq, Interrupt::Brk, Interrupt::Cop];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Location of the handler address in bank 0. BRK shares the IRQ vector in emulation mode.
    pub fn vector(self, emulation: bool) -> u16 {
        match (self, emulation) {
            (Interrupt::Reset, _) => 0xFFFC,
            (Interrupt::Nmi, true) => 0xFFFA,
            (Interrupt::Nmi, false) => 0xFFEA,
            (Interrupt::Abort, true) => 0xFFF8,
            (Interrupt::Abort, false) => 0xFFE8,
            (Interrupt::Irq | Interrupt::Brk, true) => 0xFFFE,
            (Interrupt::Irq, false) => 0xFFEE,
            (Interrupt::Brk, false) => 0xFFE6,
            (Interrupt::Cop, true) => 0xFFF4,
            (Interrupt::Cop, false) => 0xFFE4,
        }
    }
}

/// Pending interrupts plus the `wai`/`stp` halt states.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptHandler {
    pending: u8,
    /// Set by `wai`, cleared by the next interrupt
    wait:    bool,
    /// Set by `stp`, cleared only by a reset
    stopped: bool,
}

impl InterruptHandler {
    pub fn request(&mut self, interrupt: Interrupt) {
        self.pending |= interrupt.bit();
    }

    pub fn is_pending(&self, interrupt: Interrupt) -> bool {
        self.pending & interrupt.bit() != 0
    }

    pub fn clear(&mut self, interrupt: Interrupt) {
        self.pending &= !interrupt.bit();
    }

    pub fn is_waiting(&self) -> bool {
        self.wait
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// No instruction gets dispatched while this is true.
    pub fn is_halted(&self) -> bool {
        self.wait || self.stopped
    }

    pub(crate) fn wait(&mut self) {
        self.wait = true;
    }

    pub(crate) fn stop(&mut self) {
        self.stopped = true;
    }

    /// Takes the highest priority interrupt that can be serviced now and wakes the CPU up for it.
    /// A masked IRQ still ends `wai`, execution then resumes after the `wai` without a vector.
    pub fn poll(&mut self, irq_disabled: bool) -> Option<Interrupt> {
        if self.stopped && !self.is_pending(Interrupt::Reset) {
            return None;
        }

        let next = Interrupt::PRIORITY
            .into_iter()
            .find(|&i| self.is_pending(i) && !(i == Interrupt::Irq && irq_disabled));

        match next {
            Some(interrupt) => {
                self.clear(interrupt);
                self.wait = false;
                Some(interrupt)
            }
            None => {
                if self.wait && self.is_pending(Interrupt::Irq) {
                    self.wait = false;
                }
                None
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Runs the entry sequence of `interrupt` and returns the cycles it took.
pub(crate) fn service<M: Mem>(
    regs: &mut Registers,
    handler: &mut InterruptHandler,
    mem: &mut M,
    interrupt: Interrupt,
) -> Result<u32, BusError> {
    if interrupt == Interrupt::Reset {
        *handler = InterruptHandler::default();
        regs.emulation = true;
        regs.p = StatusReg::new();
        regs.s = 0x0100;
        regs.d = 0;
        regs.dbr = 0;
        regs.k = 0;
        regs.x &= 0xFF;
        regs.y &= 0xFF;
        regs.pc = load_vector(mem, interrupt.vector(true))?;
        return Ok(7);
    }

    let emulation = regs.emulation;
    let (k, pc) = (regs.k, regs.pc);
    let mut p = regs.p.bits();
    if emulation {
        if interrupt == Interrupt::Brk {
            p |= StatusReg::BREAK;
        } else {
            p &= !StatusReg::BREAK;
        }
    }

    let mut stack = Stack::new(&mut *regs, &mut *mem);
    if !emulation {
        stack.push_byte(k)?;
    }
    stack.push_word(pc)?;
    stack.push_byte(p)?;

    regs.p.set_irq_disable(true);
    regs.p.set_decimal(false);
    regs.k = 0;
    regs.pc = load_vector(mem, interrupt.vector(emulation))?;

    Ok(if emulation { 7 } else { 8 })
}

fn load_vector<M: Mem>(mem: &mut M, vector: u16) -> Result<u16, BusError> {
    let lo = mem.load(Address::new(0, vector))? as u16;
    let hi = mem.load(Address::new(0, vector.wrapping_add(1)))? as u16;
    Ok((hi << 8) | lo)
}
