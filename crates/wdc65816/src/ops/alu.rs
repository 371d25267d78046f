use crate::{
    addressing::{AddressingMode, Operand},
    context::OpContext,
    error::CpuError,
    statusreg::StatusReg,
    width::Width,
    Mem,
};

/// Binary or BCD `a + b + C` at `width`. Sets N, V, Z and C and returns the truncated result.
///
/// Decimal mode adjusts one nibble at a time, carrying the adjusted low part into the next
/// nibble. V is taken before the final adjustment.
pub fn add_with_carry(p: &mut StatusReg, a: u16, b: u16, width: Width) -> u16 {
    let mask = width.mask() as u32;
    let bits = width.bits();
    let (a, b) = (a as u32 & mask, b as u32 & mask);
    let c = p.carry() as u32;

    let mut res = if p.decimal() {
        let mut res = (a & 0xF) + (b & 0xF) + c;
        let mut shift = 4;
        while shift < bits {
            if res >= 0xA << (shift - 4) {
                res += 0x6 << (shift - 4);
            }
            let low = (1 << shift) - 1;
            let nibble = 0xF << shift;
            res = (a & nibble) + (b & nibble) + (res & low) + if res > low { 1 << shift } else { 0 };
            shift += 4;
        }
        res
    } else {
        a + b + c
    };

    let sign = width.sign_bit() as u32;
    p.set_overflow((!(a ^ b) & (a ^ res) & sign) != 0);
    if p.decimal() && res >= 0xA << (bits - 4) {
        res += 0x6 << (bits - 4);
    }
    p.set_carry(res > mask);
    p.set_nz(res as u16, width)
}

/// Binary or BCD `a - b - !C` at `width`, computed as an addition of the complement.
pub fn subtract_with_borrow(p: &mut StatusReg, a: u16, b: u16, width: Width) -> u16 {
    let mask = width.mask() as i32;
    let bits = width.bits();
    let a = a as i32 & mask;
    let b = (b as i32 & mask) ^ mask;
    let c = p.carry() as i32;

    let mut res = if p.decimal() {
        let mut res = (a & 0xF) + (b & 0xF) + c;
        let mut shift = 4;
        while shift < bits {
            if res < 0x10 << (shift - 4) {
                res -= 0x6 << (shift - 4);
            }
            let low = (1 << shift) - 1;
            let nibble = 0xF << shift;
            res = (a & nibble) + (b & nibble) + (res & low) + if res > low { 1 << shift } else { 0 };
            shift += 4;
        }
        res
    } else {
        a + b + c
    };

    let sign = width.sign_bit() as i32;
    p.set_overflow((!(a ^ b) & (a ^ res) & sign) != 0);
    if p.decimal() && res < 1 << bits {
        res -= 0x6 << (bits - 4);
    }
    p.set_carry(res > mask);
    p.set_nz(res as u16, width)
}

/// `reg - value` without storing the result: C means no borrow.
pub fn compare(p: &mut StatusReg, reg: u16, value: u16, width: Width) {
    let (reg, value) = (reg & width.mask(), value & width.mask());
    p.set_carry(reg >= value);
    p.set_nz(reg.wrapping_sub(value), width);
}

// -------------------------------------------------------------------------------------------------

pub(super) fn adc<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    arithmetic(ctx, am, add_with_carry)
}

pub(super) fn sbc<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    arithmetic(ctx, am, subtract_with_borrow)
}

fn arithmetic<M: Mem>(
    ctx: &mut OpContext<'_, M>,
    am: AddressingMode,
    f: fn(&mut StatusReg, u16, u16, Width) -> u16,
) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let res = f(&mut ctx.regs.p, ctx.regs.a, value, width);
    ctx.regs.a = width.merge(ctx.regs.a, res);
    ctx.word_penalty(width, 1);
    Ok(())
}

pub(super) fn logical<M: Mem>(
    ctx: &mut OpContext<'_, M>,
    am: AddressingMode,
    f: fn(u16, u16) -> u16,
) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let res = ctx.regs.p.set_nz(f(ctx.regs.a, value), width);
    ctx.regs.a = width.merge(ctx.regs.a, res);
    ctx.word_penalty(width, 1);
    Ok(())
}

fn compare_with<M: Mem>(
    ctx: &mut OpContext<'_, M>,
    am: AddressingMode,
    reg: u16,
    width: Width,
) -> Result<(), CpuError> {
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    compare(&mut ctx.regs.p, reg, value, width);
    ctx.word_penalty(width, 1);
    Ok(())
}

pub(super) fn cmp<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (a, width) = (ctx.regs.a, ctx.acc_width());
    compare_with(ctx, am, a, width)
}

pub(super) fn cpx<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (x, width) = (ctx.regs.x, ctx.index_width());
    compare_with(ctx, am, x, width)
}

pub(super) fn cpy<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let (y, width) = (ctx.regs.y, ctx.index_width());
    compare_with(ctx, am, y, width)
}

/// Immediate `bit` only touches Z.
pub(super) fn bit<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let a = ctx.regs.a & width.mask();
    let p = &mut ctx.regs.p;
    p.set_zero(value & a == 0);
    if !matches!(operand, Operand::Immediate(_)) {
        p.set_negative(value & width.sign_bit() != 0);
        p.set_overflow(value & (width.sign_bit() >> 1) != 0);
    }
    ctx.word_penalty(width, 1);
    Ok(())
}

/// Test and set bits
pub(super) fn tsb<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    test_bits(ctx, am, |value, a| value | a)
}

/// Test and reset bits
pub(super) fn trb<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    test_bits(ctx, am, |value, a| value & !a)
}

fn test_bits<M: Mem>(
    ctx: &mut OpContext<'_, M>,
    am: AddressingMode,
    f: fn(u16, u16) -> u16,
) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let a = ctx.regs.a & width.mask();
    ctx.regs.p.set_zero(value & a == 0);
    ctx.write(operand, width, f(value, a))?;
    ctx.word_penalty(width, 2);
    Ok(())
}

// -------------------------------------------------------------------------------------------------

pub(super) fn asl_value(value: u16, _carry: bool, width: Width) -> (u16, bool) {
    (value << 1, value & width.sign_bit() != 0)
}

pub(super) fn lsr_value(value: u16, _carry: bool, _width: Width) -> (u16, bool) {
    (value >> 1, value & 1 != 0)
}

pub(super) fn rol_value(value: u16, carry: bool, width: Width) -> (u16, bool) {
    ((value << 1) | carry as u16, value & width.sign_bit() != 0)
}

pub(super) fn ror_value(value: u16, carry: bool, width: Width) -> (u16, bool) {
    ((value >> 1) | (carry as u16) << (width.bits() - 1), value & 1 != 0)
}

/// Read-modify-write shift or rotate, on A or memory.
pub(super) fn shift<M: Mem>(
    ctx: &mut OpContext<'_, M>,
    am: AddressingMode,
    f: fn(u16, bool, Width) -> (u16, bool),
) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let (res, carry) = f(value, ctx.regs.p.carry(), width);
    ctx.regs.p.set_carry(carry);
    let res = ctx.regs.p.set_nz(res, width);
    ctx.write(operand, width, res)?;
    if operand != Operand::Accumulator {
        ctx.word_penalty(width, 2);
    }
    Ok(())
}

/// `inc`/`dec`; `delta` is 1 or -1 as a wrapping u16.
pub(super) fn inc_dec<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode, delta: u16) -> Result<(), CpuError> {
    let width = ctx.acc_width();
    let operand = am.resolve(ctx)?;
    let value = ctx.read(operand, width)?;
    let res = ctx.regs.p.set_nz(value.wrapping_add(delta), width);
    ctx.write(operand, width, res)?;
    if operand != Operand::Accumulator {
        ctx.word_penalty(width, 2);
    }
    Ok(())
}

pub(super) fn inx<M: Mem>(ctx: &mut OpContext<'_, M>, delta: u16) -> Result<(), CpuError> {
    let width = ctx.index_width();
    let res = ctx.regs.p.set_nz(ctx.regs.x.wrapping_add(delta), width);
    ctx.regs.x = width.merge(ctx.regs.x, res);
    Ok(())
}

pub(super) fn iny<M: Mem>(ctx: &mut OpContext<'_, M>, delta: u16) -> Result<(), CpuError> {
    let width = ctx.index_width();
    let res = ctx.regs.p.set_nz(ctx.regs.y.wrapping_add(delta), width);
    ctx.regs.y = width.merge(ctx.regs.y, res);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(decimal: bool, carry: bool) -> StatusReg {
        let mut p = StatusReg(0);
        p.set_decimal(decimal);
        p.set_carry(carry);
        p
    }

    #[test]
    fn bcd_addition() {
        let mut p = flags(true, false);
        assert_eq!(add_with_carry(&mut p, 0x79, 0x79, Width::Byte), 0x58);
        assert!(p.carry());

        let mut p = flags(true, false);
        assert_eq!(add_with_carry(&mut p, 0x09, 0x01, Width::Byte), 0x10);
        assert!(!p.carry());

        let mut p = flags(true, true);
        assert_eq!(add_with_carry(&mut p, 0x9999, 0x0000, Width::Word), 0x0000);
        assert!(p.carry() && p.zero());

        let mut p = flags(true, false);
        assert_eq!(add_with_carry(&mut p, 0x1234, 0x4321, Width::Word), 0x5555);
    }

    #[test]
    fn bcd_subtraction() {
        let mut p = flags(true, true);
        assert_eq!(subtract_with_borrow(&mut p, 0x10, 0x01, Width::Byte), 0x09);
        assert!(p.carry());

        let mut p = flags(true, true);
        assert_eq!(subtract_with_borrow(&mut p, 0x50, 0x01, Width::Byte), 0x49);

        let mut p = flags(true, true);
        assert_eq!(subtract_with_borrow(&mut p, 0x00, 0x01, Width::Byte), 0x99);
        assert!(!p.carry());

        let mut p = flags(true, true);
        assert_eq!(subtract_with_borrow(&mut p, 0x1000, 0x0001, Width::Word), 0x0999);
        assert!(p.carry());
    }

    #[test]
    fn binary_overflow() {
        let mut p = flags(false, false);
        assert_eq!(add_with_carry(&mut p, 0x7F, 0x01, Width::Byte), 0x80);
        assert!(p.overflow() && p.negative() && !p.carry());

        let mut p = flags(false, true);
        assert_eq!(subtract_with_borrow(&mut p, 0x8000, 0x0001, Width::Word), 0x7FFF);
        assert!(p.overflow() && p.carry());
    }

    #[test]
    fn byte_result_matches_low_byte_of_word_result() {
        for (a, b) in [(0x12F0, 0x0034), (0x00FF, 0x0001), (0xABCD, 0x1234)] {
            let mut word = flags(false, false);
            let mut byte = flags(false, false);
            let w = add_with_carry(&mut word, a, b, Width::Word);
            let s = add_with_carry(&mut byte, a, b, Width::Byte);
            assert_eq!(w & 0xFF, s);
        }
    }

    #[test]
    fn compare_sets_carry_on_no_borrow() {
        let mut p = StatusReg(0);
        compare(&mut p, 0x40, 0x40, Width::Byte);
        assert!(p.carry() && p.zero());
        compare(&mut p, 0x30, 0x40, Width::Byte);
        assert!(!p.carry() && p.negative());
        compare(&mut p, 0x1240, 0x0040, Width::Byte);
        assert!(p.carry() && p.zero());
    }

    #[test]
    fn rotates_use_the_width_sign_bit() {
        assert_eq!(ror_value(0x0001, true, Width::Byte), (0x0080, true));
        assert_eq!(ror_value(0x0001, true, Width::Word), (0x8000, true));
        assert_eq!(rol_value(0x8000, false, Width::Word), (0x0000, true));
        assert_eq!(asl_value(0x0080, false, Width::Byte), (0x0100, true));
    }
}
