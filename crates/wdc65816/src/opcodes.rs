//! The 256-entry opcode table

use std::fmt;

use Mnemonic::*;
use Mode::*;

use crate::statusreg::StatusReg;

// -------------------------------------------------------------------------------------------------

/// Addressing mode as listed in the opcode table, before any operand bytes are read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Mode {
    Accumulator,
    Address,
    AddressIndirect,
    AddressLongIndirect,
    AddressXIndex,
    AddressYIndex,
    AddressXIndexIndirect,
    BlockMove,
    Constant8,
    DirectPage,
    DirectPageIndirect,
    DirectPageIndirectYIndex,
    DirectPageLongIndirect,
    DirectPageLongIndirectYIndex,
    DirectPageXIndex,
    DirectPageXIndexIndirect,
    DirectPageYIndex,
    DirectPageSIndex,
    DirectPageSIndexIndirectYIndex,
    Implied,
    ImmediateXFlagDependent,
    ImmediateMFlagDependent,
    Long,
    LongXIndex,
    Relative8,
    Relative16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Mnemonic {
    // Loads, stores and transfers
    LDA, LDX, LDY, STA, STX, STY, STZ, TAX,
    TAY, TCD, TCS, TDC, TSC, TSX, TXA, TXS,
    TXY, TYA, TYX, XBA, MVN, MVP,

    // Arithmetic and logic
    ADC, SBC, AND, ORA, EOR, BIT, TRB, TSB,
    CMP, CPX, CPY, INC, INX, INY, DEC, DEX,
    DEY, ASL, LSR, ROL, ROR,

    // Stack
    PEA, PEI, PER, PHA, PHB, PHD, PHK, PHP,
    PHX, PHY, PLA, PLB, PLD, PLP, PLX, PLY,

    // Control flow
    BCC, BCS, BEQ, BMI, BNE, BPL, BRA, BRL,
    BVC, BVS, JMP, JML, JSL, JSR, RTI, RTL,
    RTS, BRK, COP,

    // Status and processor control
    CLC, CLD, CLI, CLV, SEC, SED, SEI, REP,
    SEP, XCE, NOP, WAI, STP, WDM,
}

/// One row of the opcode table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub opcode:   u8,
    pub mnemonic: Mnemonic,
    pub mode:     Mode,
    /// Minimum cycle count, assuming 8-bit registers and a page-aligned direct page
    pub cycles:   u8,
}

/// Opcode lookup used by the CPU. Starts out as a copy of [`OPCODES`]; slots can be removed so
/// that executing them fails with `UnknownOpcode` instead of running.
#[derive(Clone)]
pub struct OpcodeTable {
    slots: [Option<Operation>; 0x100],
}

// -------------------------------------------------------------------------------------------------

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Mode {
    /// Operand bytes following the opcode. Flag-dependent immediates count as 16-bit here.
    #[inline]
    pub const fn operands_size(self) -> u16 {
        match self {
            Accumulator | Implied => 0,
            Long | LongXIndex => 3,
            Address | AddressIndirect | AddressLongIndirect | AddressXIndex | AddressYIndex => 2,
            AddressXIndexIndirect | BlockMove | Relative16 => 2,
            ImmediateXFlagDependent | ImmediateMFlagDependent => 2,
            _ => 1,
        }
    }
}

impl Operation {
    pub const fn new(opcode: u8, mnemonic: Mnemonic, mode: Mode, cycles: u8) -> Self {
        Self { opcode, mnemonic, mode, cycles }
    }

    pub const fn base_size(self) -> u16 {
        1 + self.mode.operands_size()
    }

    /// Instruction size under the given flags. Immediate operands shrink to one byte when the
    /// register they belong to is 8-bit.
    pub fn size(self, p: StatusReg) -> u16 {
        match self.mode {
            ImmediateMFlagDependent if p.small_acc() => self.base_size() - 1,
            ImmediateXFlagDependent if p.small_index() => self.base_size() - 1,
            _ => self.base_size(),
        }
    }
}

impl OpcodeTable {
    pub fn standard() -> Self {
        let mut slots = [None; 0x100];
        for op in OPCODES.iter() {
            slots[op.opcode as usize] = Some(*op);
        }
        Self { slots }
    }

    pub fn get(&self, opcode: u8) -> Option<Operation> {
        self.slots[opcode as usize]
    }

    /// Removes an opcode, returning what was there.
    pub fn unassign(&mut self, opcode: u8) -> Option<Operation> {
        self.slots[opcode as usize].take()
    }

    pub fn assign(&mut self, op: Operation) {
        self.slots[op.opcode as usize] = Some(op);
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::standard()
    }
}

// -------------------------------------------------------------------------------------------------

/// Ordered by hex values of opcodes
pub static OPCODES: [Operation; 0x100] = [
    /* 00 */ Operation::new(0x00, BRK, Constant8, 7),
    /* 01 */ Operation::new(0x01, ORA, DirectPageXIndexIndirect, 6),
    /* 02 */ Operation::new(0x02, COP, Constant8, 7),
    /* 03 */ Operation::new(0x03, ORA, DirectPageSIndex, 4),
    /* 04 */ Operation::new(0x04, TSB, DirectPage, 5),
    /* 05 */ Operation::new(0x05, ORA, DirectPage, 3),
    /* 06 */ Operation::new(0x06, ASL, DirectPage, 5),
    /* 07 */ Operation::new(0x07, ORA, DirectPageLongIndirect, 6),
    /* 08 */ Operation::new(0x08, PHP, Implied, 3),
    /* 09 */ Operation::new(0x09, ORA, ImmediateMFlagDependent, 2),
    /* 0A */ Operation::new(0x0A, ASL, Accumulator, 2),
    /* 0B */ Operation::new(0x0B, PHD, Implied, 4),
    /* 0C */ Operation::new(0x0C, TSB, Address, 6),
    /* 0D */ Operation::new(0x0D, ORA, Address, 4),
    /* 0E */ Operation::new(0x0E, ASL, Address, 6),
    /* 0F */ Operation::new(0x0F, ORA, Long, 5),
    /* 10 */ Operation::new(0x10, BPL, Relative8, 2),
    /* 11 */ Operation::new(0x11, ORA, DirectPageIndirectYIndex, 5),
    /* 12 */ Operation::new(0x12, ORA, DirectPageIndirect, 5),
    /* 13 */ Operation::new(0x13, ORA, DirectPageSIndexIndirectYIndex, 7),
    /* 14 */ Operation::new(0x14, TRB, DirectPage, 5),
    /* 15 */ Operation::new(0x15, ORA, DirectPageXIndex, 4),
    /* 16 */ Operation::new(0x16, ASL, DirectPageXIndex, 6),
    /* 17 */ Operation::new(0x17, ORA, DirectPageLongIndirectYIndex, 6),
    /* 18 */ Operation::new(0x18, CLC, Implied, 2),
    /* 19 */ Operation::new(0x19, ORA, AddressYIndex, 4),
    /* 1A */ Operation::new(0x1A, INC, Accumulator, 2),
    /* 1B */ Operation::new(0x1B, TCS, Implied, 2),
    /* 1C */ Operation::new(0x1C, TRB, Address, 6),
    /* 1D */ Operation::new(0x1D, ORA, AddressXIndex, 4),
    /* 1E */ Operation::new(0x1E, ASL, AddressXIndex, 7),
    /* 1F */ Operation::new(0x1F, ORA, LongXIndex, 5),
    /* 20 */ Operation::new(0x20, JSR, Address, 6),
    /* 21 */ Operation::new(0x21, AND, DirectPageXIndexIndirect, 6),
    /* 22 */ Operation::new(0x22, JSL, Long, 8),
    /* 23 */ Operation::new(0x23, AND, DirectPageSIndex, 4),
    /* 24 */ Operation::new(0x24, BIT, DirectPage, 3),
    /* 25 */ Operation::new(0x25, AND, DirectPage, 3),
    /* 26 */ Operation::new(0x26, ROL, DirectPage, 5),
    /* 27 */ Operation::new(0x27, AND, DirectPageLongIndirect, 6),
    /* 28 */ Operation::new(0x28, PLP, Implied, 4),
    /* 29 */ Operation::new(0x29, AND, ImmediateMFlagDependent, 2),
    /* 2A */ Operation::new(0x2A, ROL, Accumulator, 2),
    /* 2B */ Operation::new(0x2B, PLD, Implied, 5),
    /* 2C */ Operation::new(0x2C, BIT, Address, 4),
    /* 2D */ Operation::new(0x2D, AND, Address, 4),
    /* 2E */ Operation::new(0x2E, ROL, Address, 6),
    /* 2F */ Operation::new(0x2F, AND, Long, 5),
    /* 30 */ Operation::new(0x30, BMI, Relative8, 2),
    /* 31 */ Operation::new(0x31, AND, DirectPageIndirectYIndex, 5),
    /* 32 */ Operation::new(0x32, AND, DirectPageIndirect, 5),
    /* 33 */ Operation::new(0x33, AND, DirectPageSIndexIndirectYIndex, 7),
    /* 34 */ Operation::new(0x34, BIT, DirectPageXIndex, 4),
    /* 35 */ Operation::new(0x35, AND, DirectPageXIndex, 4),
    /* 36 */ Operation::new(0x36, ROL, DirectPageXIndex, 6),
    /* 37 */ Operation::new(0x37, AND, DirectPageLongIndirectYIndex, 6),
    /* 38 */ Operation::new(0x38, SEC, Implied, 2),
    /* 39 */ Operation::new(0x39, AND, AddressYIndex, 4),
    /* 3A */ Operation::new(0x3A, DEC, Accumulator, 2),
    /* 3B */ Operation::new(0x3B, TSC, Implied, 2),
    /* 3C */ Operation::new(0x3C, BIT, AddressXIndex, 4),
    /* 3D */ Operation::new(0x3D, AND, AddressXIndex, 4),
    /* 3E */ Operation::new(0x3E, ROL, AddressXIndex, 7),
    /* 3F */ Operation::new(0x3F, AND, LongXIndex, 5),
    /* 40 */ Operation::new(0x40, RTI, Implied, 6),
    /* 41 */ Operation::new(0x41, EOR, DirectPageXIndexIndirect, 6),
    /* 42 */ Operation::new(0x42, WDM, Constant8, 2),
    /* 43 */ Operation::new(0x43, EOR, DirectPageSIndex, 4),
    /* 44 */ Operation::new(0x44, MVP, BlockMove, 7),
    /* 45 */ Operation::new(0x45, EOR, DirectPage, 3),
    /* 46 */ Operation::new(0x46, LSR, DirectPage, 5),
    /* 47 */ Operation::new(0x47, EOR, DirectPageLongIndirect, 6),
    /* 48 */ Operation::new(0x48, PHA, Implied, 3),
    /* 49 */ Operation::new(0x49, EOR, ImmediateMFlagDependent, 2),
    /* 4A */ Operation::new(0x4A, LSR, Accumulator, 2),
    /* 4B */ Operation::new(0x4B, PHK, Implied, 3),
    /* 4C */ Operation::new(0x4C, JMP, Address, 3),
    /* 4D */ Operation::new(0x4D, EOR, Address, 4),
    /* 4E */ Operation::new(0x4E, LSR, Address, 6),
    /* 4F */ Operation::new(0x4F, EOR, Long, 5),
    /* 50 */ Operation::new(0x50, BVC, Relative8, 2),
    /* 51 */ Operation::new(0x51, EOR, DirectPageIndirectYIndex, 5),
    /* 52 */ Operation::new(0x52, EOR, DirectPageIndirect, 5),
    /* 53 */ Operation::new(0x53, EOR, DirectPageSIndexIndirectYIndex, 7),
    /* 54 */ Operation::new(0x54, MVN, BlockMove, 7),
    /* 55 */ Operation::new(0x55, EOR, DirectPageXIndex, 4),
    /* 56 */ Operation::new(0x56, LSR, DirectPageXIndex, 6),
    /* 57 */ Operation::new(0x57, EOR, DirectPageLongIndirectYIndex, 6),
    /* 58 */ Operation::new(0x58, CLI, Implied, 2),
    /* 59 */ Operation::new(0x59, EOR, AddressYIndex, 4),
    /* 5A */ Operation::new(0x5A, PHY, Implied, 3),
    /* 5B */ Operation::new(0x5B, TCD, Implied, 2),
    /* 5C */ Operation::new(0x5C, JML, Long, 4),
    /* 5D */ Operation::new(0x5D, EOR, AddressXIndex, 4),
    /* 5E */ Operation::new(0x5E, LSR, AddressXIndex, 7),
    /* 5F */ Operation::new(0x5F, EOR, LongXIndex, 5),
    /* 60 */ Operation::new(0x60, RTS, Implied, 6),
    /* 61 */ Operation::new(0x61, ADC, DirectPageXIndexIndirect, 6),
    /* 62 */ Operation::new(0x62, PER, Relative16, 6),
    /* 63 */ Operation::new(0x63, ADC, DirectPageSIndex, 4),
    /* 64 */ Operation::new(0x64, STZ, DirectPage, 3),
    /* 65 */ Operation::new(0x65, ADC, DirectPage, 3),
    /* 66 */ Operation::new(0x66, ROR, DirectPage, 5),
    /* 67 */ Operation::new(0x67, ADC, DirectPageLongIndirect, 6),
    /* 68 */ Operation::new(0x68, PLA, Implied, 4),
    /* 69 */ Operation::new(0x69, ADC, ImmediateMFlagDependent, 2),
    /* 6A */ Operation::new(0x6A, ROR, Accumulator, 2),
    /* 6B */ Operation::new(0x6B, RTL, Implied, 6),
    /* 6C */ Operation::new(0x6C, JMP, AddressIndirect, 5),
    /* 6D */ Operation::new(0x6D, ADC, Address, 4),
    /* 6E */ Operation::new(0x6E, ROR, Address, 6),
    /* 6F */ Operation::new(0x6F, ADC, Long, 5),
    /* 70 */ Operation::new(0x70, BVS, Relative8, 2),
    /* 71 */ Operation::new(0x71, ADC, DirectPageIndirectYIndex, 5),
    /* 72 */ Operation::new(0x72, ADC, DirectPageIndirect, 5),
    /* 73 */ Operation::new(0x73, ADC, DirectPageSIndexIndirectYIndex, 7),
    /* 74 */ Operation::new(0x74, STZ, DirectPageXIndex, 4),
    /* 75 */ Operation::new(0x75, ADC, DirectPageXIndex, 4),
    /* 76 */ Operation::new(0x76, ROR, DirectPageXIndex, 6),
    /* 77 */ Operation::new(0x77, ADC, DirectPageLongIndirectYIndex, 6),
    /* 78 */ Operation::new(0x78, SEI, Implied, 2),
    /* 79 */ Operation::new(0x79, ADC, AddressYIndex, 4),
    /* 7A */ Operation::new(0x7A, PLY, Implied, 4),
    /* 7B */ Operation::new(0x7B, TDC, Implied, 2),
    /* 7C */ Operation::new(0x7C, JMP, AddressXIndexIndirect, 6),
    /* 7D */ Operation::new(0x7D, ADC, AddressXIndex, 4),
    /* 7E */ Operation::new(0x7E, ROR, AddressXIndex, 7),
    /* 7F */ Operation::new(0x7F, ADC, LongXIndex, 5),
    /* 80 */ Operation::new(0x80, BRA, Relative8, 2),
    /* 81 */ Operation::new(0x81, STA, DirectPageXIndexIndirect, 6),
    /* 82 */ Operation::new(0x82, BRL, Relative16, 4),
    /* 83 */ Operation::new(0x83, STA, DirectPageSIndex, 4),
    /* 84 */ Operation::new(0x84, STY, DirectPage, 3),
    /* 85 */ Operation::new(0x85, STA, DirectPage, 3),
    /* 86 */ Operation::new(0x86, STX, DirectPage, 3),
    /* 87 */ Operation::new(0x87, STA, DirectPageLongIndirect, 6),
    /* 88 */ Operation::new(0x88, DEY, Implied, 2),
    /* 89 */ Operation::new(0x89, BIT, ImmediateMFlagDependent, 2),
    /* 8A */ Operation::new(0x8A, TXA, Implied, 2),
    /* 8B */ Operation::new(0x8B, PHB, Implied, 3),
    /* 8C */ Operation::new(0x8C, STY, Address, 4),
    /* 8D */ Operation::new(0x8D, STA, Address, 4),
    /* 8E */ Operation::new(0x8E, STX, Address, 4),
    /* 8F */ Operation::new(0x8F, STA, Long, 5),
    /* 90 */ Operation::new(0x90, BCC, Relative8, 2),
    /* 91 */ Operation::new(0x91, STA, DirectPageIndirectYIndex, 6),
    /* 92 */ Operation::new(0x92, STA, DirectPageIndirect, 5),
    /* 93 */ Operation::new(0x93, STA, DirectPageSIndexIndirectYIndex, 7),
    /* 94 */ Operation::new(0x94, STY, DirectPageXIndex, 4),
    /* 95 */ Operation::new(0x95, STA, DirectPageXIndex, 4),
    /* 96 */ Operation::new(0x96, STX, DirectPageYIndex, 4),
    /* 97 */ Operation::new(0x97, STA, DirectPageLongIndirectYIndex, 6),
    /* 98 */ Operation::new(0x98, TYA, Implied, 2),
    /* 99 */ Operation::new(0x99, STA, AddressYIndex, 5),
    /* 9A */ Operation::new(0x9A, TXS, Implied, 2),
    /* 9B */ Operation::new(0x9B, TXY, Implied, 2),
    /* 9C */ Operation::new(0x9C, STZ, Address, 4),
    /* 9D */ Operation::new(0x9D, STA, AddressXIndex, 5),
    /* 9E */ Operation::new(0x9E, STZ, AddressXIndex, 5),
    /* 9F */ Operation::new(0x9F, STA, LongXIndex, 5),
    /* A0 */ Operation::new(0xA0, LDY, ImmediateXFlagDependent, 2),
    /* A1 */ Operation::new(0xA1, LDA, DirectPageXIndexIndirect, 6),
    /* A2 */ Operation::new(0xA2, LDX, ImmediateXFlagDependent, 2),
    /* A3 */ Operation::new(0xA3, LDA, DirectPageSIndex, 4),
    /* A4 */ Operation::new(0xA4, LDY, DirectPage, 3),
    /* A5 */ Operation::new(0xA5, LDA, DirectPage, 3),
    /* A6 */ Operation::new(0xA6, LDX, DirectPage, 3),
    /* A7 */ Operation::new(0xA7, LDA, DirectPageLongIndirect, 6),
    /* A8 */ Operation::new(0xA8, TAY, Implied, 2),
    /* A9 */ Operation::new(0xA9, LDA, ImmediateMFlagDependent, 2),
    /* AA */ Operation::new(0xAA, TAX, Implied, 2),
    /* AB */ Operation::new(0xAB, PLB, Implied, 4),
    /* AC */ Operation::new(0xAC, LDY, Address, 4),
    /* AD */ Operation::new(0xAD, LDA, Address, 4),
    /* AE */ Operation::new(0xAE, LDX, Address, 4),
    /* AF */ Operation::new(0xAF, LDA, Long, 5),
    /* B0 */ Operation::new(0xB0, BCS, Relative8, 2),
    /* B1 */ Operation::new(0xB1, LDA, DirectPageIndirectYIndex, 5),
    /* B2 */ Operation::new(0xB2, LDA, DirectPageIndirect, 5),
    /* B3 */ Operation::new(0xB3, LDA, DirectPageSIndexIndirectYIndex, 7),
    /* B4 */ Operation::new(0xB4, LDY, DirectPageXIndex, 4),
    /* B5 */ Operation::new(0xB5, LDA, DirectPageXIndex, 4),
    /* B6 */ Operation::new(0xB6, LDX, DirectPageYIndex, 4),
    /* B7 */ Operation::new(0xB7, LDA, DirectPageLongIndirectYIndex, 6),
    /* B8 */ Operation::new(0xB8, CLV, Implied, 2),
    /* B9 */ Operation::new(0xB9, LDA, AddressYIndex, 4),
    /* BA */ Operation::new(0xBA, TSX, Implied, 2),
    /* BB */ Operation::new(0xBB, TYX, Implied, 2),
    /* BC */ Operation::new(0xBC, LDY, AddressXIndex, 4),
    /* BD */ Operation::new(0xBD, LDA, AddressXIndex, 4),
    /* BE */ Operation::new(0xBE, LDX, AddressYIndex, 4),
    /* BF */ Operation::new(0xBF, LDA, LongXIndex, 5),
    /* C0 */ Operation::new(0xC0, CPY, ImmediateXFlagDependent, 2),
    /* C1 */ Operation::new(0xC1, CMP, DirectPageXIndexIndirect, 6),
    /* C2 */ Operation::new(0xC2, REP, Constant8, 3),
    /* C3 */ Operation::new(0xC3, CMP, DirectPageSIndex, 4),
    /* C4 */ Operation::new(0xC4, CPY, DirectPage, 3),
    /* C5 */ Operation::new(0xC5, CMP, DirectPage, 3),
    /* C6 */ Operation::new(0xC6, DEC, DirectPage, 5),
    /* C7 */ Operation::new(0xC7, CMP, DirectPageLongIndirect, 6),
    /* C8 */ Operation::new(0xC8, INY, Implied, 2),
    /* C9 */ Operation::new(0xC9, CMP, ImmediateMFlagDependent, 2),
    /* CA */ Operation::new(0xCA, DEX, Implied, 2),
    /* CB */ Operation::new(0xCB, WAI, Implied, 3),
    /* CC */ Operation::new(0xCC, CPY, Address, 4),
    /* CD */ Operation::new(0xCD, CMP, Address, 4),
    /* CE */ Operation::new(0xCE, DEC, Address, 6),
    /* CF */ Operation::new(0xCF, CMP, Long, 5),
    /* D0 */ Operation::new(0xD0, BNE, Relative8, 2),
    /* D1 */ Operation::new(0xD1, CMP, DirectPageIndirectYIndex, 5),
    /* D2 */ Operation::new(0xD2, CMP, DirectPageIndirect, 5),
    /* D3 */ Operation::new(0xD3, CMP, DirectPageSIndexIndirectYIndex, 7),
    /* D4 */ Operation::new(0xD4, PEI, DirectPageIndirect, 6),
    /* D5 */ Operation::new(0xD5, CMP, DirectPageXIndex, 4),
    /* D6 */ Operation::new(0xD6, DEC, DirectPageXIndex, 6),
    /* D7 */ Operation::new(0xD7, CMP, DirectPageLongIndirectYIndex, 6),
    /* D8 */ Operation::new(0xD8, CLD, Implied, 2),
    /* D9 */ Operation::new(0xD9, CMP, AddressYIndex, 4),
    /* DA */ Operation::new(0xDA, PHX, Implied, 3),
    /* DB */ Operation::new(0xDB, STP, Implied, 3),
    /* DC */ Operation::new(0xDC, JML, AddressLongIndirect, 6),
    /* DD */ Operation::new(0xDD, CMP, AddressXIndex, 4),
    /* DE */ Operation::new(0xDE, DEC, AddressXIndex, 7),
    /* DF */ Operation::new(0xDF, CMP, LongXIndex, 5),
    /* E0 */ Operation::new(0xE0, CPX, ImmediateXFlagDependent, 2),
    /* E1 */ Operation::new(0xE1, SBC, DirectPageXIndexIndirect, 6),
    /* E2 */ Operation::new(0xE2, SEP, Constant8, 3),
    /* E3 */ Operation::new(0xE3, SBC, DirectPageSIndex, 4),
    /* E4 */ Operation::new(0xE4, CPX, DirectPage, 3),
    /* E5 */ Operation::new(0xE5, SBC, DirectPage, 3),
    /* E6 */ Operation::new(0xE6, INC, DirectPage, 5),
    /* E7 */ Operation::new(0xE7, SBC, DirectPageLongIndirect, 6),
    /* E8 */ Operation::new(0xE8, INX, Implied, 2),
    /* E9 */ Operation::new(0xE9, SBC, ImmediateMFlagDependent, 2),
    /* EA */ Operation::new(0xEA, NOP, Implied, 2),
    /* EB */ Operation::new(0xEB, XBA, Implied, 3),
    /* EC */ Operation::new(0xEC, CPX, Address, 4),
    /* ED */ Operation::new(0xED, SBC, Address, 4),
    /* EE */ Operation::new(0xEE, INC, Address, 6),
    /* EF */ Operation::new(0xEF, SBC, Long, 5),
    /* F0 */ Operation::new(0xF0, BEQ, Relative8, 2),
    /* F1 */ Operation::new(0xF1, SBC, DirectPageIndirectYIndex, 5),
    /* F2 */ Operation::new(0xF2, SBC, DirectPageIndirect, 5),
    /* F3 */ Operation::new(0xF3, SBC, DirectPageSIndexIndirectYIndex, 7),
    /* F4 */ Operation::new(0xF4, PEA, Address, 5),
    /* F5 */ Operation::new(0xF5, SBC, DirectPageXIndex, 4),
    /* F6 */ Operation::new(0xF6, INC, DirectPageXIndex, 6),
    /* F7 */ Operation::new(0xF7, SBC, DirectPageLongIndirectYIndex, 6),
    /* F8 */ Operation::new(0xF8, SED, Implied, 2),
    /* F9 */ Operation::new(0xF9, SBC, AddressYIndex, 4),
    /* FA */ Operation::new(0xFA, PLX, Implied, 4),
    /* FB */ Operation::new(0xFB, XCE, Implied, 2),
    /* FC */ Operation::new(0xFC, JSR, AddressXIndexIndirect, 8),
    /* FD */ Operation::new(0xFD, SBC, AddressXIndex, 4),
    /* FE */ Operation::new(0xFE, INC, AddressXIndex, 7),
    /* FF */ Operation::new(0xFF, SBC, LongXIndex, 5),
];
