/// Operand width of an accumulator- or index-class operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    /// Maps the M/X flag (1 = 8-bit) to a width.
    pub fn from_small(small: bool) -> Self {
        if small {
            Width::Byte
        } else {
            Width::Word
        }
    }

    pub const fn mask(self) -> u16 {
        match self {
            Width::Byte => 0x00FF,
            Width::Word => 0xFFFF,
        }
    }

    pub const fn sign_bit(self) -> u16 {
        match self {
            Width::Byte => 0x0080,
            Width::Word => 0x8000,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Width::Byte => 8,
            Width::Word => 16,
        }
    }

    pub const fn bytes(self) -> u16 {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }

    pub fn is_word(self) -> bool {
        self == Width::Word
    }

    /// Replaces the part of `reg` covered by this width, keeping the rest.
    pub const fn merge(self, reg: u16, value: u16) -> u16 {
        (reg & !self.mask()) | (value & self.mask())
    }
}
