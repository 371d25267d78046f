use crate::{
    address::Address,
    addressing::{AddressingMode, Operand},
    context::OpContext,
    error::CpuError,
    interrupts::{self, Interrupt},
    opcodes::Mnemonic,
    statusreg::StatusReg,
    Mem,
};

fn target<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<Address, CpuError> {
    match am.resolve(ctx)? {
        Operand::Memory(addr) => Ok(addr),
        _ => Err(ctx.invalid_operand()),
    }
}

/// Conditional and unconditional branches. A taken short branch costs one more cycle.
pub(super) fn branch<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    use self::Mnemonic::*;

    let p = ctx.regs.p;
    let taken = match ctx.op.mnemonic {
        BCC => !p.carry(),
        BCS => p.carry(),
        BEQ => p.zero(),
        BNE => !p.zero(),
        BMI => p.negative(),
        BPL => !p.negative(),
        BVS => p.overflow(),
        BVC => !p.overflow(),
        _ => true,
    };
    let dest = target(ctx, am)?;
    if taken {
        ctx.regs.pc = dest.offset();
        if ctx.op.mnemonic != BRL {
            ctx.cy += 1;
        }
    }
    Ok(())
}

/// `jmp` stays in the program bank, `jml` also loads K.
pub(super) fn jump<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let dest = target(ctx, am)?;
    if ctx.op.mnemonic == Mnemonic::JML {
        ctx.regs.k = dest.bank();
    }
    ctx.regs.pc = dest.offset();
    Ok(())
}

/// The pushed return address points at the last byte of the call instruction.
pub(super) fn jsr<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let ret = ctx.regs.pc.wrapping_sub(1);
    ctx.stack().push_word(ret)?;
    ctx.regs.pc = target(ctx, am)?.offset();
    Ok(())
}

pub(super) fn jsl<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (k, ret) = (ctx.regs.k, ctx.regs.pc.wrapping_sub(1));
    let mut stack = ctx.stack();
    stack.push_byte(k)?;
    stack.push_word(ret)?;
    let dest = target(ctx, am)?;
    ctx.regs.k = dest.bank();
    ctx.regs.pc = dest.offset();
    Ok(())
}

pub(super) fn rts<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    ctx.regs.pc = ctx.stack().pull_word()?.wrapping_add(1);
    Ok(())
}

pub(super) fn rtl<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    let mut stack = ctx.stack();
    let pc = stack.pull_word()?.wrapping_add(1);
    let k = stack.pull_byte()?;
    ctx.regs.pc = pc;
    ctx.regs.k = k;
    Ok(())
}

/// Pulls P, PC and (in native mode) K in the reverse order of the interrupt entry. The extra
/// pull costs a cycle.
pub(super) fn rti<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    let p = ctx.stack().pull_byte()?;
    ctx.set_p(p);
    ctx.regs.pc = ctx.stack().pull_word()?;
    if !ctx.regs.emulation {
        ctx.regs.k = ctx.stack().pull_byte()?;
        ctx.cy += 1;
    }
    Ok(())
}

/// `brk` and `cop` enter their vector within the same step. The stacked return address is the
/// byte after the signature.
pub(super) fn software_interrupt<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    let interrupt = if ctx.op.mnemonic == Mnemonic::BRK { Interrupt::Brk } else { Interrupt::Cop };
    ctx.cy = interrupts::service(&mut *ctx.regs, &mut *ctx.interrupts, &mut *ctx.mem, interrupt)?;
    log::debug!("Entered {interrupt:?} handler at {}", Address::new(ctx.regs.k, ctx.regs.pc));
    Ok(())
}

pub(super) fn flag<M: Mem>(ctx: &mut OpContext<'_, M>) {
    use self::Mnemonic::*;

    let (flag, value) = match ctx.op.mnemonic {
        CLC => (StatusReg::CARRY, false),
        SEC => (StatusReg::CARRY, true),
        CLD => (StatusReg::DECIMAL, false),
        SED => (StatusReg::DECIMAL, true),
        CLI => (StatusReg::IRQ_DISABLE, false),
        SEI => (StatusReg::IRQ_DISABLE, true),
        _ => (StatusReg::OVERFLOW, false),
    };
    ctx.regs.p.set(flag, value);
}

pub(super) fn rep_sep<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let AddressingMode::Immediate8(mask) = am else {
        return Err(ctx.invalid_operand());
    };
    let p = ctx.regs.p.bits();
    let p = if ctx.op.mnemonic == Mnemonic::REP { p & !mask } else { p | mask };
    ctx.set_p(p);
    Ok(())
}

/// Exchanges carry and emulation bits.
pub(super) fn xce<M: Mem>(ctx: &mut OpContext<'_, M>) {
    let carry = ctx.regs.p.carry();
    ctx.regs.p.set_carry(ctx.regs.emulation);
    ctx.set_emulation(carry);
}
