//! Cartridge images: copier header handling, the internal header, and the LoROM/HiROM/ExHiROM
//! address mappings.

pub mod cartridge;
pub mod internal_header;
pub mod mapper;
pub mod rom;

pub use crate::{
    cartridge::{Cartridge, CartridgeError},
    internal_header::{InternalHeaderError, MapMode, RomInternalHeader},
    mapper::{Mapper, Target},
    rom::{Rom, RomError, SMC_HEADER_SIZE},
};
