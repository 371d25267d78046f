use crate::{
    addressing::{AddressingMode, Operand},
    context::OpContext,
    error::CpuError,
    opcodes::Mnemonic,
    width::Width,
    Mem,
};

pub(super) fn push<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    use self::Mnemonic::*;

    let regs = &*ctx.regs;
    let (value, width) = match ctx.op.mnemonic {
        PHA => (regs.a, regs.p.acc_width()),
        PHX => (regs.x, regs.p.index_width()),
        PHY => (regs.y, regs.p.index_width()),
        PHB => (regs.dbr as u16, Width::Byte),
        PHD => (regs.d, Width::Word),
        PHK => (regs.k as u16, Width::Byte),
        _ => (regs.p.bits() as u16, Width::Byte),
    };
    ctx.stack().push(value, width)?;
    if matches!(ctx.op.mnemonic, PHA | PHX | PHY) {
        ctx.word_penalty(width, 1);
    }
    Ok(())
}

pub(super) fn pull<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<(), CpuError> {
    use self::Mnemonic::*;

    let mnemonic = ctx.op.mnemonic;
    let width = match mnemonic {
        PLA => ctx.acc_width(),
        PLX | PLY => ctx.index_width(),
        PLD => Width::Word,
        _ => Width::Byte,
    };
    let value = ctx.stack().pull(width)?;

    if mnemonic == PLP {
        ctx.set_p(value as u8);
        return Ok(());
    }

    let value = ctx.regs.p.set_nz(value, width);
    let regs = &mut *ctx.regs;
    match mnemonic {
        PLA => regs.a = width.merge(regs.a, value),
        PLX => regs.x = value,
        PLY => regs.y = value,
        PLD => regs.d = value,
        _ => regs.dbr = value as u8,
    }
    if matches!(mnemonic, PLA | PLX | PLY) {
        ctx.word_penalty(width, 1);
    }
    Ok(())
}

/// `pea`, `pei` and `per` push the 16-bit offset of their effective address.
pub(super) fn push_effective<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let Operand::Memory(addr) = am.resolve(ctx)? else {
        return Err(ctx.invalid_operand());
    };
    ctx.stack().push_word(addr.offset())?;
    Ok(())
}
