use thiserror::Error;
use wdc65816::{Address, BusError};

use crate::{
    internal_header::{InternalHeaderError, RomInternalHeader},
    mapper::{Mapper, Target},
    rom::{Rom, RomError},
};

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("Reading ROM image:\n- {0}")]
    Rom(#[from] RomError),
    #[error("Parsing internal ROM header:\n- {0}")]
    Header(#[from] InternalHeaderError),
    #[error("Unsupported mapping id {0:#04X}")]
    UnsupportedMapping(u8),
    #[error("SRAM image has {actual} bytes, cartridge has {expected}")]
    SramSize { expected: usize, actual: usize },
}

/// ROM image, battery-backed SRAM and the mapping that decodes CPU addresses into them.
#[derive(Clone)]
pub struct Cartridge {
    rom:    Rom,
    sram:   Vec<u8>,
    mapper: Mapper,
    title:  String,
}

impl Cartridge {
    /// Reads the internal header to pick the mapping and SRAM size.
    pub fn new(rom: Rom) -> Result<Self, CartridgeError> {
        let header = RomInternalHeader::parse(&rom)?;
        let mapper = Mapper::from_map_mode(header.map_mode)
            .ok_or(CartridgeError::UnsupportedMapping(header.map_mode.as_u8()))?;
        let sram_size = header.sram_size_in_bytes();

        log::info!(
            "Cartridge \"{}\": {} ({}), header at {}, {} KiB ROM, {} KiB SRAM, region {}, chips {:?}",
            header.internal_rom_name,
            header.map_mode,
            mapper,
            mapper.rom_address(header.location),
            rom.len() / 1024,
            sram_size / 1024,
            header.region_code.map_or_else(|| String::from("unknown"), |r| r.to_string()),
            header.rom_type,
        );
        if rom.len() / 1024 != header.rom_size_in_kb() as usize {
            log::warn!("Header declares {} KiB of ROM, image has {} KiB", header.rom_size_in_kb(), rom.len() / 1024);
        }
        if sram_size / 1024 != header.sram_size_in_kb() as usize {
            log::warn!("Header declares {} KiB of SRAM, capped to {} KiB", header.sram_size_in_kb(), sram_size / 1024);
        }
        Ok(Self { rom, sram: vec![0; sram_size], mapper, title: header.internal_rom_name })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CartridgeError> {
        Self::new(Rom::new(bytes)?)
    }

    /// Skips header detection.
    pub fn with_mapper(rom: Rom, mapper: Mapper, sram_size: usize) -> Self {
        Self { rom, sram: vec![0; sram_size], mapper, title: String::new() }
    }

    pub fn rom(&self) -> &Rom {
        &self.rom
    }

    pub fn mapper(&self) -> Mapper {
        self.mapper
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sram(&self) -> &[u8] {
        &self.sram
    }

    /// Restores battery-backed RAM, e.g. from a save file or a save state.
    pub fn load_sram(&mut self, data: &[u8]) -> Result<(), CartridgeError> {
        if data.len() != self.sram.len() {
            return Err(CartridgeError::SramSize { expected: self.sram.len(), actual: data.len() });
        }
        self.sram.copy_from_slice(data);
        Ok(())
    }

    pub fn claims_expansion(&self, addr: Address) -> bool {
        self.mapper.claims_expansion(addr)
    }

    /// Reads through the mapping. Addresses the mapping has no target for, including SRAM on a
    /// cartridge without any, are an error.
    pub fn read(&self, addr: Address) -> Result<u8, BusError> {
        match self.mapper.map(addr) {
            Some(Target::Rom(index)) => Ok(self.rom.mirrored(index)),
            Some(Target::Sram(index)) if !self.sram.is_empty() => Ok(self.sram[index % self.sram.len()]),
            _ => Err(BusError::UnmappedCartridgeRead(addr)),
        }
    }

    pub fn write(&mut self, addr: Address, value: u8) {
        match self.mapper.map(addr) {
            Some(Target::Sram(index)) if !self.sram.is_empty() => {
                let len = self.sram.len();
                self.sram[index % len] = value;
            }
            Some(Target::Rom(index)) => log::debug!("Ignored write of {value:#04X} to ROM at {addr} ({index:#X})"),
            _ => log::warn!("Unmapped cartridge write of {value:#04X} at {addr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorom(size: usize) -> Cartridge {
        Cartridge::with_mapper(Rom::new((0..size).map(|i| (i >> 15) as u8).collect()).unwrap(), Mapper::LoRom, 0x800)
    }

    #[test]
    fn undersized_rom_is_mirrored() {
        let cart = lorom(0x10000);
        assert_eq!(cart.read(Address::new(0x00, 0x8000)), Ok(0));
        assert_eq!(cart.read(Address::new(0x01, 0x8000)), Ok(1));
        assert_eq!(cart.read(Address::new(0x02, 0x8000)), Ok(0));
    }

    #[test]
    fn sram_is_mirrored_and_writable() {
        let mut cart = lorom(0x8000);
        cart.write(Address::new(0x70, 0x0001), 0x42);
        assert_eq!(cart.read(Address::new(0x70, 0x0801)), Ok(0x42));
        assert_eq!(cart.read(Address::new(0xF0, 0x0001)), Ok(0x42));
        assert_eq!(cart.sram()[1], 0x42);
    }

    #[test]
    fn writes_to_rom_are_ignored() {
        let mut cart = lorom(0x8000);
        cart.write(Address::new(0x00, 0x8000), 0xFF);
        assert_eq!(cart.read(Address::new(0x00, 0x8000)), Ok(0));
    }

    #[test]
    fn missing_sram_is_unmapped() {
        let mut cart = Cartridge::with_mapper(Rom::new(vec![0; 0x8000]).unwrap(), Mapper::LoRom, 0);
        let addr = Address::new(0x70, 0x0000);
        cart.write(addr, 1);
        assert_eq!(cart.read(addr), Err(BusError::UnmappedCartridgeRead(addr)));
    }

    #[test]
    fn load_sram_checks_size() {
        let mut cart = lorom(0x8000);
        assert!(cart.load_sram(&[0; 0x800]).is_ok());
        assert!(matches!(cart.load_sram(&[0; 4]), Err(CartridgeError::SramSize { expected: 0x800, actual: 4 })));
    }
}
