use crate::{
    address::Address,
    addressing::AddressingMode,
    context::OpContext,
    error::CpuError,
    opcodes::Mnemonic,
    width::Width,
    Mem,
};

pub(super) fn lda<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let value = ctx.regs.p.set_nz(value, width);
    ctx.regs.a = width.merge(ctx.regs.a, value);
    ctx.word_penalty(width, 1);
    Ok(())
}

pub(super) fn ldx<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let width = ctx.index_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    ctx.regs.x = ctx.regs.p.set_nz(value, width);
    ctx.word_penalty(width, 1);
    Ok(())
}

pub(super) fn ldy<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let width = ctx.index_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    ctx.regs.y = ctx.regs.p.set_nz(value, width);
    ctx.word_penalty(width, 1);
    Ok(())
}

fn store<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode, value: u16, width: Width) -> Result<(), CpuError> {
    let operand = am.resolve(ctx)?;
    ctx.write(operand, width, value)?;
    ctx.word_penalty(width, 1);
    Ok(())
}

pub(super) fn sta<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (a, width) = (ctx.regs.a, ctx.acc_width());
    store(ctx, am, a, width)
}

pub(super) fn stx<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (x, width) = (ctx.regs.x, ctx.index_width());
    store(ctx, am, x, width)
}

pub(super) fn sty<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (y, width) = (ctx.regs.y, ctx.index_width());
    store(ctx, am, y, width)
}

pub(super) fn stz<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    store(ctx, am, 0, width)
}

/// Register to register transfers. The destination's width decides how much is copied and
/// which bits N and Z look at.
pub(super) fn register<M: Mem>(ctx: &mut OpContext<'_, M>) {
    use self::Mnemonic::*;

    let regs = &mut *ctx.regs;
    let (acc, index) = (regs.p.acc_width(), regs.p.index_width());
    match ctx.op.mnemonic {
        TAX => regs.x = regs.p.set_nz(regs.a, index),
        TAY => regs.y = regs.p.set_nz(regs.a, index),
        TXA => regs.a = acc.merge(regs.a, regs.p.set_nz(regs.x, acc)),
        TYA => regs.a = acc.merge(regs.a, regs.p.set_nz(regs.y, acc)),
        TXY => regs.y = regs.p.set_nz(regs.x, index),
        TYX => regs.x = regs.p.set_nz(regs.y, index),
        TSX => regs.x = regs.p.set_nz(regs.s, index),
        TXS => regs.s = if regs.emulation { 0x0100 | (regs.x & 0xFF) } else { regs.x },
        TCS => regs.s = if regs.emulation { 0x0100 | (regs.a & 0xFF) } else { regs.a },
        TSC => regs.a = regs.p.set_nz(regs.s, Width::Word),
        TCD => regs.d = regs.p.set_nz(regs.a, Width::Word),
        TDC => regs.a = regs.p.set_nz(regs.d, Width::Word),
        XBA => {
            regs.a = regs.a.swap_bytes();
            regs.p.set_nz(regs.a, Width::Byte);
        }
        _ => {}
    }
}

/// `mvn` (`step` = 1) and `mvp` (`step` = -1). Copies A + 1 bytes from the source bank at X to
/// the destination bank at Y in one go; A ends up as 0xFFFF and DBR as the destination bank.
pub(super) fn block_move<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode, step: u16) -> Result<(), CpuError> {
    let AddressingMode::BlockMove { dst, src } = am else {
        return Err(ctx.invalid_operand());
    };
    let width = ctx.index_width();
    ctx.regs.dbr = dst;

    let mut first = true;
    loop {
        let value = ctx.loadb(Address::new(src, ctx.regs.x))?;
        ctx.storeb(Address::new(dst, ctx.regs.y), value)?;
        ctx.regs.x = ctx.regs.x.wrapping_add(step) & width.mask();
        ctx.regs.y = ctx.regs.y.wrapping_add(step) & width.mask();
        ctx.regs.a = ctx.regs.a.wrapping_sub(1);

        if !first {
            ctx.cy += 7;
        }
        first = false;

        if ctx.regs.a == 0xFFFF {
            break;
        }
    }
    Ok(())
}
