#![allow(clippy::identity_op)]

//! Cartridge address decoding

use std::fmt;

use serde::{Deserialize, Serialize};
use wdc65816::Address;

use crate::internal_header::MapMode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mapper {
    LoRom,
    HiRom,
    ExHiRom,
}

/// What a cartridge address decodes to. Indices are not yet mirrored to the memory size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Rom(usize),
    Sram(usize),
}

impl Mapper {
    /// Mapping registry keyed by the header's map mode byte.
    pub fn from_id(id: u8) -> Option<Self> {
        MapMode::try_from(id).ok().and_then(Self::from_map_mode)
    }

    /// ExLoROM has no mapping. ROM speed does not change the layout.
    pub fn from_map_mode(map_mode: MapMode) -> Option<Self> {
        match map_mode {
            m if m.is_exhirom() => Some(Mapper::ExHiRom),
            m if m.is_exlorom() => None,
            m if m.is_hirom() => Some(Mapper::HiRom),
            _ => Some(Mapper::LoRom),
        }
    }

    pub fn map(self, addr: Address) -> Option<Target> {
        let bank = addr.bank() as usize;
        let page = addr.offset() as usize;
        let full = addr.to_u24() as usize;

        if bank & 0xFE == 0x7E {
            return None;
        }

        match self {
            Mapper::LoRom => {
                if (full & 0x708000) == 0x700000 {
                    // sram (low parts of banks 70-7D and F0-FF)
                    Some(Target::Sram((bank & 0x0F) * 0x8000 + page))
                } else if (full & 0x408000) == 0x000000 {
                    // hardware regs, ram mirrors, other strange junk
                    None
                } else {
                    Some(Target::Rom((full & 0x7F0000) >> 1 | (full & 0x7FFF)))
                }
            }
            Mapper::HiRom | Mapper::ExHiRom => {
                if self.claims_expansion(addr) {
                    Some(Target::Sram((bank & 0x1F) * 0x2000 + (page - 0x6000)))
                } else if (full & 0x408000) == 0x000000 {
                    None
                } else if self == Mapper::ExHiRom && bank & 0x80 == 0 {
                    Some(Target::Rom((full & 0x3FFFFF) + 0x400000))
                } else {
                    Some(Target::Rom(full & 0x3FFFFF))
                }
            }
        }
    }

    /// Whether the cartridge answers in the 6000-7FFF expansion area of the system banks.
    pub fn claims_expansion(self, addr: Address) -> bool {
        match self {
            Mapper::LoRom => false,
            Mapper::HiRom | Mapper::ExHiRom => {
                (0x20..0x40).contains(&(addr.bank() & 0x7F)) && (0x6000..0x8000).contains(&addr.offset())
            }
        }
    }

    /// Inverse of [`Mapper::map`] for ROM indices, giving the canonical CPU address.
    pub fn rom_address(self, index: usize) -> Address {
        let raw = match self {
            Mapper::LoRom => {
                let in_bank = index & 0x7FFF;
                let bank = (index >> 15) & 0x7F;
                (bank << 16) + in_bank + 0x8000 + if bank >= 0x7E { 0x800000 } else { 0 }
            }
            Mapper::HiRom => (index & 0x3FFFFF) | 0xC00000,
            Mapper::ExHiRom if index < 0x400000 => index | 0xC00000,
            Mapper::ExHiRom => (index & 0x3FFFFF) | 0x400000,
        };
        Address::new((raw >> 16) as u8, raw as u16)
    }
}

impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Mapper::LoRom => "LoROM",
            Mapper::HiRom => "HiROM",
            Mapper::ExHiRom => "ExHiROM",
        })
    }
}
