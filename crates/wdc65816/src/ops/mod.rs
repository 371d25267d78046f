//! Instruction implementations, one function per mnemonic family

mod alu;
mod control;
mod stack;
mod transfer;

pub use self::alu::{add_with_carry, compare, subtract_with_borrow};
use crate::{addressing::AddressingMode, context::OpContext, error::CpuError, opcodes::Mnemonic, Mem};

pub(crate) fn execute<M: Mem>(ctx: &mut OpContext<'_, M>, am: AddressingMode) -> Result<(), CpuError> {
    use self::Mnemonic::*;

    match ctx.op.mnemonic {
        // Arithmetic and logic
        ADC => alu::adc(ctx, am),
        SBC => alu::sbc(ctx, am),
        AND => alu::logical(ctx, am, |a, b| a & b),
        ORA => alu::logical(ctx, am, |a, b| a | b),
        EOR => alu::logical(ctx, am, |a, b| a ^ b),
        CMP => alu::cmp(ctx, am),
        CPX => alu::cpx(ctx, am),
        CPY => alu::cpy(ctx, am),
        BIT => alu::bit(ctx, am),
        TSB => alu::tsb(ctx, am),
        TRB => alu::trb(ctx, am),
        ASL => alu::shift(ctx, am, alu::asl_value),
        LSR => alu::shift(ctx, am, alu::lsr_value),
        ROL => alu::shift(ctx, am, alu::rol_value),
        ROR => alu::shift(ctx, am, alu::ror_value),
        INC => alu::inc_dec(ctx, am, 1),
        DEC => alu::inc_dec(ctx, am, 0xFFFF),
        INX => alu::inx(ctx, 1),
        DEX => alu::inx(ctx, 0xFFFF),
        INY => alu::iny(ctx, 1),
        DEY => alu::iny(ctx, 0xFFFF),

        // Loads, stores and register transfers
        LDA => transfer::lda(ctx, am),
        LDX => transfer::ldx(ctx, am),
        LDY => transfer::ldy(ctx, am),
        STA => transfer::sta(ctx, am),
        STX => transfer::stx(ctx, am),
        STY => transfer::sty(ctx, am),
        STZ => transfer::stz(ctx, am),
        TAX | TAY | TXA | TYA | TXY | TYX | TSX | TXS | TCS | TSC | TCD | TDC | XBA => {
            transfer::register(ctx);
            Ok(())
        }
        MVN => transfer::block_move(ctx, am, 1),
        MVP => transfer::block_move(ctx, am, 0xFFFF),

        // Stack
        PHA | PHX | PHY | PHB | PHD | PHK | PHP => stack::push(ctx),
        PLA | PLX | PLY | PLB | PLD | PLP => stack::pull(ctx),
        PEA | PEI | PER => stack::push_effective(ctx, am),

        // Control flow
        BCC | BCS | BEQ | BMI | BNE | BPL | BRA | BRL | BVC | BVS => control::branch(ctx, am),
        JMP | JML => control::jump(ctx, am),
        JSR => control::jsr(ctx, am),
        JSL => control::jsl(ctx, am),
        RTS => control::rts(ctx),
        RTL => control::rtl(ctx),
        RTI => control::rti(ctx),
        BRK | COP => control::software_interrupt(ctx),
        CLC | CLD | CLI | CLV | SEC | SED | SEI => {
            control::flag(ctx);
            Ok(())
        }
        REP | SEP => control::rep_sep(ctx, am),
        XCE => {
            control::xce(ctx);
            Ok(())
        }
        WAI => {
            if !ctx.regs.p.irq_disable() {
                ctx.interrupts.wait();
            }
            Ok(())
        }
        STP => {
            ctx.interrupts.stop();
            Ok(())
        }
        NOP | WDM => Ok(()),
    }
}
