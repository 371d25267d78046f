//! Operand decoding and effective address calculation

use std::fmt;

use crate::{address::Address, context::OpContext, error::CpuError, opcodes::Mode, Mem};

/// Decoded operand bytes of one instruction. Effective addresses are only computed by
/// [`AddressingMode::resolve`], since they depend on registers at execution time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,

    /// `#const`, sized by M or X at decode time
    Immediate(u16),
    /// `#const` that is always one byte (`rep`, `sep`, `brk`, `cop`, `wdm`)
    Immediate8(u8),

    /// `rel`: K:(PC + rel), wrapping in the program bank
    Rel(i8),
    /// `rel16`, for `brl` and `per`
    RelLong(i16),

    /// `d`: 0:(D + d)
    Direct(u8),
    /// `d,x`
    DirectIndexedX(u8),
    /// `d,y`
    DirectIndexedY(u8),
    /// `(d,x)`: DBR:word[0:(D + d + X)]
    DirectIndexedIndirect(u8),
    /// `(d)`: DBR:word[0:(D + d)]
    DirectIndirect(u8),
    /// `(d),y`: DBR:(word[0:(D + d)] + Y), wrapping in the data bank
    DirectIndirectIndexed(u8),
    /// `[d]`: long[0:(D + d)]
    DirectIndirectLong(u8),
    /// `[d],y`: long[0:(D + d)] + Y, carrying into the bank
    DirectIndirectLongIdx(u8),

    /// `a`: DBR:a
    Absolute(u16),
    /// `a,x`
    AbsIndexedX(u16),
    /// `a,y`
    AbsIndexedY(u16),
    /// `(a,x)`: K:word[K:(a + X)]
    AbsIndexedIndirect(u16),
    /// `al,x`: bank:a + X, carrying into the bank
    AbsLongIndexedX(u8, u16),
    /// `al`
    AbsoluteLong(u8, u16),
    /// `(a)`: K:word[0:a]
    AbsoluteIndirect(u16),
    /// `[a]`: long[0:a]
    AbsoluteIndirectLong(u16),

    /// `d,s`: 0:(S + d)
    StackRel(u8),
    /// `(d,s),y`: DBR:(word[0:(S + d)] + Y)
    StackRelIndirectIndexed(u8),

    /// `mvn`/`mvp` bank pair. Encoded destination first.
    BlockMove { dst: u8, src: u8 },
}

/// Where an instruction's data lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Accumulator,
    Immediate(u16),
    Memory(Address),
}

impl AddressingMode {
    /// Reads the operand bytes following the opcode.
    pub(crate) fn decode<M: Mem>(ctx: &mut OpContext<'_, M>) -> Result<Self, CpuError> {
        use self::AddressingMode::*;

        let am = match ctx.op.mode {
            Mode::Implied => Implied,
            Mode::Accumulator => Accumulator,
            Mode::Constant8 => Immediate8(ctx.operand_byte(0)?),
            Mode::ImmediateMFlagDependent if ctx.regs.p.small_acc() => Immediate8(ctx.operand_byte(0)?),
            Mode::ImmediateXFlagDependent if ctx.regs.p.small_index() => Immediate8(ctx.operand_byte(0)?),
            Mode::ImmediateMFlagDependent | Mode::ImmediateXFlagDependent => Immediate(ctx.operand_word(0)?),
            Mode::Relative8 => Rel(ctx.operand_byte(0)? as i8),
            Mode::Relative16 => RelLong(ctx.operand_word(0)? as i16),
            Mode::DirectPage => Direct(ctx.operand_byte(0)?),
            Mode::DirectPageXIndex => DirectIndexedX(ctx.operand_byte(0)?),
            Mode::DirectPageYIndex => DirectIndexedY(ctx.operand_byte(0)?),
            Mode::DirectPageXIndexIndirect => DirectIndexedIndirect(ctx.operand_byte(0)?),
            Mode::DirectPageIndirect => DirectIndirect(ctx.operand_byte(0)?),
            Mode::DirectPageIndirectYIndex => DirectIndirectIndexed(ctx.operand_byte(0)?),
            Mode::DirectPageLongIndirect => DirectIndirectLong(ctx.operand_byte(0)?),
            Mode::DirectPageLongIndirectYIndex => DirectIndirectLongIdx(ctx.operand_byte(0)?),
            Mode::DirectPageSIndex => StackRel(ctx.operand_byte(0)?),
            Mode::DirectPageSIndexIndirectYIndex => StackRelIndirectIndexed(ctx.operand_byte(0)?),
            Mode::Address => Absolute(ctx.operand_word(0)?),
            Mode::AddressXIndex => AbsIndexedX(ctx.operand_word(0)?),
            Mode::AddressYIndex => AbsIndexedY(ctx.operand_word(0)?),
            Mode::AddressXIndexIndirect => AbsIndexedIndirect(ctx.operand_word(0)?),
            Mode::AddressIndirect => AbsoluteIndirect(ctx.operand_word(0)?),
            Mode::AddressLongIndirect => AbsoluteIndirectLong(ctx.operand_word(0)?),
            Mode::Long => {
                let addr = ctx.operand_word(0)?;
                AbsoluteLong(ctx.operand_byte(2)?, addr)
            }
            Mode::LongXIndex => {
                let addr = ctx.operand_word(0)?;
                AbsLongIndexedX(ctx.operand_byte(2)?, addr)
            }
            Mode::BlockMove => BlockMove { dst: ctx.operand_byte(0)?, src: ctx.operand_byte(1)? },
        };
        Ok(am)
    }

    /// Computes where the data is. For jumps and branches, the address is the target. Adds the
    /// cycle penalties of the mode: an unaligned direct page, and 16-bit index registers on
    /// `a,x`, `a,y` and `(d),y`.
    pub(crate) fn resolve<M: Mem>(self, ctx: &mut OpContext<'_, M>) -> Result<Operand, CpuError> {
        use self::AddressingMode::*;

        let index_mask = ctx.index_width().mask();
        let x = ctx.regs.x & index_mask;
        let y = ctx.regs.y & index_mask;
        let (d, s, dbr, k, pc) = (ctx.regs.d, ctx.regs.s, ctx.regs.dbr, ctx.regs.k, ctx.regs.pc);

        let direct_penalty = |ctx: &mut OpContext<'_, M>| {
            if d & 0xFF != 0 {
                ctx.cy += 1;
            }
        };
        let index_penalty = |ctx: &mut OpContext<'_, M>| {
            if !ctx.regs.p.small_index() {
                ctx.cy += 1;
            }
        };
        let direct = |offset: u8| Address::new(0, d.wrapping_add(offset as u16));

        let addr = match self {
            Implied | BlockMove { .. } => return Err(ctx.invalid_operand()),
            Accumulator => return Ok(Operand::Accumulator),
            Immediate(val) => return Ok(Operand::Immediate(val)),
            Immediate8(val) => return Ok(Operand::Immediate(val as u16)),

            Rel(rel) => Address::new(k, pc.wrapping_add(rel as i16 as u16)),
            RelLong(rel) => Address::new(k, pc.wrapping_add(rel as u16)),

            Direct(offset) => {
                direct_penalty(ctx);
                direct(offset)
            }
            DirectIndexedX(offset) => {
                direct_penalty(ctx);
                direct(offset).wrapping_add(x)
            }
            DirectIndexedY(offset) => {
                direct_penalty(ctx);
                direct(offset).wrapping_add(y)
            }
            DirectIndexedIndirect(offset) => {
                direct_penalty(ctx);
                let ptr = ctx.loadw(direct(offset).wrapping_add(x))?;
                Address::new(dbr, ptr)
            }
            DirectIndirect(offset) => {
                direct_penalty(ctx);
                Address::new(dbr, ctx.loadw(direct(offset))?)
            }
            DirectIndirectIndexed(offset) => {
                direct_penalty(ctx);
                index_penalty(ctx);
                Address::new(dbr, ctx.loadw(direct(offset))?).wrapping_add(y)
            }
            DirectIndirectLong(offset) => {
                direct_penalty(ctx);
                ctx.load_long(direct(offset))?
            }
            DirectIndirectLongIdx(offset) => {
                direct_penalty(ctx);
                ctx.load_long(direct(offset))?.wrapping_add_long(y as u32)
            }

            Absolute(addr) => Address::new(dbr, addr),
            AbsIndexedX(addr) => {
                index_penalty(ctx);
                Address::new(dbr, addr.wrapping_add(x))
            }
            AbsIndexedY(addr) => {
                index_penalty(ctx);
                Address::new(dbr, addr.wrapping_add(y))
            }
            AbsIndexedIndirect(addr) => Address::new(k, ctx.loadw(Address::new(k, addr.wrapping_add(x)))?),
            AbsLongIndexedX(bank, addr) => Address::new(bank, addr).wrapping_add_long(x as u32),
            AbsoluteLong(bank, addr) => Address::new(bank, addr),
            AbsoluteIndirect(addr) => Address::new(k, ctx.loadw(Address::new(0, addr))?),
            AbsoluteIndirectLong(addr) => ctx.load_long(Address::new(0, addr))?,

            StackRel(offset) => Address::new(0, s.wrapping_add(offset as u16)),
            StackRelIndirectIndexed(offset) => {
                let ptr = ctx.loadw(Address::new(0, s.wrapping_add(offset as u16)))?;
                Address::new(dbr, ptr).wrapping_add(y)
            }
        };
        Ok(Operand::Memory(addr))
    }
}

impl AddressingMode {
    /// Operand value in hex digits. Long addresses use six.
    fn hex_operand(self) -> Option<(u32, usize)> {
        use self::AddressingMode::*;

        match self {
            Immediate8(v) | Direct(v) | DirectIndexedX(v) | DirectIndexedY(v) | DirectIndexedIndirect(v)
            | DirectIndirect(v) | DirectIndirectIndexed(v) | DirectIndirectLong(v) | DirectIndirectLongIdx(v)
            | StackRel(v) | StackRelIndirectIndexed(v) => Some((v as u32, 2)),
            Immediate(v) | Absolute(v) | AbsIndexedX(v) | AbsIndexedY(v) | AbsIndexedIndirect(v)
            | AbsoluteIndirect(v) | AbsoluteIndirectLong(v) => Some((v as u32, 4)),
            AbsoluteLong(bank, addr) | AbsLongIndexedX(bank, addr) => Some(((bank as u32) << 16 | addr as u32, 6)),
            _ => None,
        }
    }

    /// Text written before and after the operand value.
    fn decoration(self) -> (&'static str, &'static str) {
        use self::AddressingMode::*;

        match self {
            Immediate(_) | Immediate8(_) => ("#", ""),
            DirectIndexedX(_) | AbsIndexedX(_) | AbsLongIndexedX(..) => ("", ",x"),
            DirectIndexedY(_) | AbsIndexedY(_) => ("", ",y"),
            DirectIndexedIndirect(_) | AbsIndexedIndirect(_) => ("(", ",x)"),
            DirectIndirect(_) | AbsoluteIndirect(_) => ("(", ")"),
            DirectIndirectIndexed(_) => ("(", "),y"),
            DirectIndirectLong(_) | AbsoluteIndirectLong(_) => ("[", "]"),
            DirectIndirectLongIdx(_) => ("[", "],y"),
            StackRel(_) => ("", ",s"),
            StackRelIndirectIndexed(_) => ("(", ",s),y"),
            _ => ("", ""),
        }
    }
}

fn write_hex(f: &mut fmt::Formatter, value: u32, digits: usize) -> fmt::Result {
    if digits > 4 {
        write!(f, "${:02X}:{:04X}", value >> 16, value & 0xFFFF)
    } else {
        write!(f, "${:0digits$X}", value)
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::AddressingMode::*;

        match *self {
            Implied => Ok(()),
            Accumulator => f.write_str("a"),
            Rel(rel) => write!(f, "{rel:+}"),
            RelLong(rel) => write!(f, "{rel:+}"),
            // Assembler order is source bank first
            BlockMove { dst, src } => {
                write_hex(f, src as u32, 2)?;
                f.write_str(",")?;
                write_hex(f, dst as u32, 2)
            }
            am => {
                let (open, close) = am.decoration();
                f.write_str(open)?;
                if let Some((value, digits)) = am.hex_operand() {
                    write_hex(f, value, digits)?;
                }
                f.write_str(close)
            }
        }
    }
}
