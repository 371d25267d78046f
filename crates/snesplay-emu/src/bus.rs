//! The CPU-visible 24-bit address space.

use serde::{Deserialize, Serialize};
use snesplay_rom::Cartridge;
use wdc65816::{Address, BusError, Mem};

use crate::{
    io::CpuIo,
    state::StateError,
    wram::{Wram, WRAM_SIZE},
};

/// Registers $2180-$2183 on the B-bus.
const WMDATA: u8 = 0x80;
const WMADDL: u8 = 0x81;
const WMADDH: u8 = 0x83;

/// $2100-$21FF
const B_REGS_SIZE: usize = 0x100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Region {
    Wram(usize),
    PortB(u8),
    PortA(u16),
    Cartridge,
    Open,
}

/// Bus contents that belong in a save state. The ROM itself does not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusState {
    pub mdr:    u8,
    pub wram:   Wram,
    pub io:     CpuIo,
    pub b_regs: Vec<u8>,
    pub sram:   Option<Vec<u8>>,
}

#[derive(Clone)]
pub struct Bus {
    pub wram: Wram,
    pub io:   CpuIo,
    /// Latched B-bus registers for the video and audio side
    b_regs:   Vec<u8>,
    cart:     Option<Cartridge>,
    /// Last value read, returned for addresses nothing answers to
    mdr:      u8,
    /// Cycles the CPU was paused for DMA since the last `take_stall`
    stall:    u32,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self { wram: Wram::default(), io: CpuIo::default(), b_regs: vec![0; B_REGS_SIZE], cart: None, mdr: 0, stall: 0 }
    }

    pub fn insert_cartridge(&mut self, cart: Cartridge) {
        self.cart = Some(cart);
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cart.as_ref()
    }

    pub fn mdr(&self) -> u8 {
        self.mdr
    }

    /// Puts the I/O registers and the data latch back to their power-on values. Memory is left
    /// alone.
    pub fn reset(&mut self) {
        self.io = CpuIo::default();
        self.b_regs.fill(0);
        self.mdr = 0;
        self.stall = 0;
    }

    pub fn take_stall(&mut self) -> u32 {
        std::mem::take(&mut self.stall)
    }

    fn region(&self, addr: Address) -> Region {
        let bank = addr.bank();
        let offset = addr.offset();

        if bank & 0xFE == 0x7E {
            return Region::Wram(((bank as usize & 1) << 16) | offset as usize);
        }
        if bank & 0x40 != 0 {
            return Region::Cartridge;
        }
        match offset {
            0x0000..=0x1FFF => Region::Wram(offset as usize),
            0x2100..=0x21FF => Region::PortB(offset as u8),
            0x4000..=0x43FF => Region::PortA(offset),
            0x8000..=0xFFFF => Region::Cartridge,
            0x6000..=0x7FFF if self.cart.as_ref().map_or(false, |c| c.claims_expansion(addr)) => Region::Cartridge,
            _ => Region::Open,
        }
    }

    pub fn read(&mut self, addr: Address) -> Result<u8, BusError> {
        let value = match self.region(addr) {
            Region::Wram(index) => Some(self.wram.read(index)),
            Region::PortB(reg) => self.read_b(reg),
            Region::PortA(offset) => self.io.read(offset),
            Region::Cartridge => self.cart.as_ref().map(|c| c.read(addr)).transpose()?,
            Region::Open => None,
        };
        if let Some(value) = value {
            self.mdr = value;
        }
        Ok(self.mdr)
    }

    pub fn write(&mut self, addr: Address, value: u8) -> Result<(), BusError> {
        match self.region(addr) {
            Region::Wram(index) => self.wram.write(index, value),
            Region::PortB(reg) => self.write_b(reg, value),
            Region::PortA(offset) => {
                if let Some(channels) = self.io.write(offset, value) {
                    self.run_dma(channels)?;
                }
            }
            Region::Cartridge => match self.cart.as_mut() {
                Some(cart) => cart.write(addr, value),
                None => log::debug!("Write of {value:#04X} to {addr} with no cartridge inserted"),
            },
            Region::Open => log::debug!("Open bus write of {value:#04X} to {addr}"),
        }
        Ok(())
    }

    /// Reads without touching the data latch or any read-sensitive register.
    pub fn peek(&self, addr: Address) -> u8 {
        let value = match self.region(addr) {
            Region::Wram(index) => Some(self.wram.read(index)),
            Region::PortB(WMDATA) => Some(self.wram.peek_port()),
            Region::PortB(WMADDL..=WMADDH) => None,
            Region::PortB(reg) => Some(self.b_regs[reg as usize]),
            Region::PortA(offset) => self.io.peek(offset),
            Region::Cartridge => self.cart.as_ref().and_then(|c| c.read(addr).ok()),
            Region::Open => None,
        };
        value.unwrap_or(self.mdr)
    }

    fn read_b(&mut self, reg: u8) -> Option<u8> {
        match reg {
            WMDATA => Some(self.wram.read_port()),
            WMADDL..=WMADDH => None,
            _ => Some(self.b_regs[reg as usize]),
        }
    }

    fn write_b(&mut self, reg: u8, value: u8) {
        match reg {
            WMDATA => self.wram.write_port(value),
            WMADDL..=WMADDH => self.wram.set_port_byte(reg - WMADDL, value),
            _ => self.b_regs[reg as usize] = value,
        }
    }

    // DMA -----------------------------------------------------------------------------------------

    /// The A-bus side of a DMA cannot see the I/O windows.
    fn read_a_bus(&mut self, addr: Address) -> Result<u8, BusError> {
        match self.region(addr) {
            Region::PortA(_) | Region::PortB(_) => Ok(self.mdr),
            _ => self.read(addr),
        }
    }

    fn write_a_bus(&mut self, addr: Address, value: u8) -> Result<(), BusError> {
        match self.region(addr) {
            Region::PortA(_) | Region::PortB(_) => {
                log::debug!("DMA write of {value:#04X} to I/O at {addr} dropped");
                Ok(())
            }
            _ => self.write(addr, value),
        }
    }

    fn run_dma(&mut self, channels: u8) -> Result<(), BusError> {
        for ch in 0..8 {
            if channels & (1 << ch) != 0 {
                self.process_dma_ch(ch)?;
            }
        }
        Ok(())
    }

    fn process_dma_ch(&mut self, index: usize) -> Result<(), BusError> {
        let mut ch = self.io.channels[index];
        let size = match ch.byte_count() {
            0 => 0x10000,
            n => n as u32,
        };
        let pattern = ch.pattern();
        log::debug!(
            "DMA {index} size {size:04X}: ${:02X}:{:04X} {} $21{:02X}, mode {}",
            ch.a_bank(),
            ch.a_offset(),
            if ch.b_to_a() { "<=" } else { "=>" },
            ch.b_address(),
            ch.mode(),
        );

        let mut offset = ch.a_offset();
        for i in 0..size {
            let reg = ch.b_address().wrapping_add(pattern[i as usize % pattern.len()]);
            let addr = Address::new(ch.a_bank(), offset);
            if ch.b_to_a() {
                let value = self.read_b(reg).unwrap_or(self.mdr);
                self.write_a_bus(addr, value)?;
            } else {
                let value = self.read_a_bus(addr)?;
                self.write_b(reg, value);
            }
            if !ch.fixed() {
                offset = if ch.decrement() { offset.wrapping_sub(1) } else { offset.wrapping_add(1) };
            }
        }

        ch.set_a_offset(offset);
        ch.set_byte_count(0);
        self.io.channels[index] = ch;
        self.stall += size + 1;
        Ok(())
    }

    // State ---------------------------------------------------------------------------------------

    pub fn save_state(&self) -> BusState {
        BusState {
            mdr:    self.mdr,
            wram:   self.wram.clone(),
            io:     self.io.clone(),
            b_regs: self.b_regs.clone(),
            sram:   self.cart.as_ref().map(|c| c.sram().to_vec()),
        }
    }

    /// Nothing is changed when the state does not fit this bus.
    pub fn load_state(&mut self, state: &BusState) -> Result<(), StateError> {
        StateError::check_size("WRAM", WRAM_SIZE, state.wram.as_bytes().len())?;
        StateError::check_size("B-bus registers", B_REGS_SIZE, state.b_regs.len())?;
        match (self.cart.as_mut(), &state.sram) {
            (Some(cart), Some(sram)) => cart.load_sram(sram)?,
            (None, Some(_)) => return Err(StateError::NoCartridge),
            _ => {}
        }
        self.mdr = state.mdr;
        self.wram = state.wram.clone();
        self.io = state.io.clone();
        self.b_regs = state.b_regs.clone();
        self.stall = 0;
        Ok(())
    }
}

impl Mem for Bus {
    fn load(&mut self, addr: Address) -> Result<u8, BusError> {
        self.read(addr)
    }

    fn store(&mut self, addr: Address, value: u8) -> Result<(), BusError> {
        self.write(addr, value)
    }
}
