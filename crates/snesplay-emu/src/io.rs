//! CPU-side I/O registers at $4200-$43FF (window A).

use serde::{Deserialize, Serialize};

#[rustfmt::skip]
pub mod regs {
    pub const NMITIMEN: u16 = 0x4200;
    pub const WRMPYA:   u16 = 0x4202;
    pub const WRMPYB:   u16 = 0x4203;
    pub const WRDIVL:   u16 = 0x4204;
    pub const WRDIVH:   u16 = 0x4205;
    pub const WRDIVB:   u16 = 0x4206;
    pub const MDMAEN:   u16 = 0x420B;
    pub const HDMAEN:   u16 = 0x420C;
    pub const RDNMI:    u16 = 0x4210;
    pub const TIMEUP:   u16 = 0x4211;
    pub const HVBJOY:   u16 = 0x4212;
    pub const RDDIVL:   u16 = 0x4214;
    pub const RDDIVH:   u16 = 0x4215;
    pub const RDMPYL:   u16 = 0x4216;
    pub const RDMPYH:   u16 = 0x4217;
    pub const DMA_BASE: u16 = 0x4300;
    pub const DMA_END:  u16 = 0x437F;
}

/// CPU revision reported in the low bits of RDNMI.
const CPU_VERSION: u8 = 0x02;

// -------------------------------------------------------------------------------------------------

/// The sixteen registers of one DMA channel ($43x0-$43xF).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmaChannel {
    pub regs: [u8; 16],
}

#[rustfmt::skip]
impl DmaChannel {
    pub fn params(&self)       -> u8   { self.regs[0x0] }
    pub fn b_address(&self)    -> u8   { self.regs[0x1] }
    pub fn a_offset(&self)     -> u16  { u16::from_le_bytes([self.regs[0x2], self.regs[0x3]]) }
    pub fn a_bank(&self)       -> u8   { self.regs[0x4] }
    pub fn byte_count(&self)   -> u16  { u16::from_le_bytes([self.regs[0x5], self.regs[0x6]]) }
    pub fn b_to_a(&self)       -> bool { self.params() & 0x80 != 0 }
    pub fn fixed(&self)        -> bool { self.params() & 0x08 != 0 }
    pub fn decrement(&self)    -> bool { self.params() & 0x10 != 0 }
    pub fn mode(&self)         -> u8   { self.params() & 0x07 }

    pub fn set_a_offset(&mut self, offset: u16) {
        self.regs[0x2..0x4].copy_from_slice(&offset.to_le_bytes());
    }

    pub fn set_byte_count(&mut self, count: u16) {
        self.regs[0x5..0x7].copy_from_slice(&count.to_le_bytes());
    }

    /// B-bus register offsets visited by one unit of the transfer mode.
    pub fn pattern(&self) -> &'static [u8] {
        match self.mode() {
            0 => &[0],
            1 => &[0, 1],
            2 | 6 => &[0, 0],
            3 | 7 => &[0, 0, 1, 1],
            4 => &[0, 1, 2, 3],
            _ => &[0, 1, 0, 1],
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuIo {
    nmitimen: u8,
    nmi_flag: bool,
    wrmpya:   u8,
    wrdiv:    u16,
    rddiv:    u16,
    rdmpy:    u16,
    pub channels: [DmaChannel; 8],
}

impl CpuIo {
    pub fn nmi_enabled(&self) -> bool {
        self.nmitimen & 0x80 != 0
    }

    /// Latches the vblank NMI flag read back through RDNMI.
    pub fn set_nmi_flag(&mut self) {
        self.nmi_flag = true;
    }

    /// Reads without side effects. `None` for write-only and unused registers.
    pub fn peek(&self, offset: u16) -> Option<u8> {
        use regs::*;
        match offset {
            RDNMI => Some((self.nmi_flag as u8) << 7 | CPU_VERSION),
            TIMEUP | HVBJOY => Some(0),
            RDDIVL => Some(self.rddiv as u8),
            RDDIVH => Some((self.rddiv >> 8) as u8),
            RDMPYL => Some(self.rdmpy as u8),
            RDMPYH => Some((self.rdmpy >> 8) as u8),
            DMA_BASE..=DMA_END => {
                let (channel, reg) = Self::channel_reg(offset);
                Some(self.channels[channel].regs[reg])
            }
            _ => None,
        }
    }

    pub fn read(&mut self, offset: u16) -> Option<u8> {
        let value = self.peek(offset);
        if offset == regs::RDNMI {
            self.nmi_flag = false;
        }
        value
    }

    /// Returns the MDMAEN channel mask when the write starts a DMA transfer.
    pub fn write(&mut self, offset: u16, value: u8) -> Option<u8> {
        use regs::*;
        match offset {
            NMITIMEN => self.nmitimen = value,
            WRMPYA => self.wrmpya = value,
            WRMPYB => {
                self.rdmpy = self.wrmpya as u16 * value as u16;
                self.rddiv = value as u16;
            }
            WRDIVL => self.wrdiv = self.wrdiv & 0xFF00 | value as u16,
            WRDIVH => self.wrdiv = self.wrdiv & 0x00FF | (value as u16) << 8,
            WRDIVB => {
                if value == 0 {
                    self.rddiv = 0xFFFF;
                    self.rdmpy = self.wrdiv;
                } else {
                    self.rddiv = self.wrdiv / value as u16;
                    self.rdmpy = self.wrdiv % value as u16;
                }
            }
            MDMAEN if value != 0 => return Some(value),
            MDMAEN => {}
            HDMAEN => log::debug!("HDMA enable {value:#010b} ignored, HDMA runs on the video side"),
            DMA_BASE..=DMA_END => {
                let (channel, reg) = Self::channel_reg(offset);
                self.channels[channel].regs[reg] = value;
            }
            _ => log::debug!("Ignored write of {value:#04X} to I/O register ${offset:04X}"),
        }
        None
    }

    fn channel_reg(offset: u16) -> (usize, usize) {
        (((offset >> 4) & 0x7) as usize, (offset & 0xF) as usize)
    }
}
