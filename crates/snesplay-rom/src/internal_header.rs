use std::{convert::TryFrom, fmt};

use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{le_u16, le_u8},
    sequence::pair,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::rom::{Rom, RomError};

#[rustfmt::skip]
pub mod offsets {
    pub const MAP_MODE:          usize = 0x15;
    pub const ROM_TYPE:          usize = 0x16;
    pub const ROM_SIZE:          usize = 0x17;
    pub const SRAM_SIZE:         usize = 0x18;
    pub const REGION_CODE:       usize = 0x19;
    pub const DEVELOPER_ID:      usize = 0x1A;
    pub const VERSION_NUMBER:    usize = 0x1B;
    pub const COMPLEMENT_CHECK:  usize = 0x1C;
    pub const CHECKSUM:          usize = 0x1E;
    pub const NATIVE_VECTORS:    usize = 0x24;
    pub const EMULATION_VECTORS: usize = 0x34;
}

#[rustfmt::skip]
pub mod sizes {
    pub const INTERNAL_HEADER:   usize = 64;
    pub const INTERNAL_ROM_NAME: usize = 21;
}

/// Image offsets where the header may live, in the order they are tried.
#[rustfmt::skip]
pub const HEADER_LOCATIONS: [(usize, &str); 3] = [
    (0x007FC0, "LoROM"),
    (0x00FFC0, "HiROM"),
    (0x40FFC0, "ExHiROM"),
];

#[derive(Debug, Error)]
pub enum InternalHeaderError {
    #[error("Couldn't find internal ROM header")]
    NotFound,
    #[error("Reading checksum and complement at {location:#X}:\n- {source}")]
    ReadChecksum { location: usize, source: RomError },
    #[error("Reading Internal ROM Name:\n- {0}")]
    ReadRomName(RomError),
    #[error("Reading cartridge info bytes:\n- {0}")]
    ReadInfo(RomError),
    #[error("Reading interrupt vectors:\n- {0}")]
    ReadInterruptVectors(RomError),
    #[error("Unsupported map mode {0:#04X}")]
    UnsupportedMapMode(u8),
}

// -------------------------------------------------------------------------------------------------

pub struct RomInternalHeader {
    /// Image offset the header was read from
    pub location:          usize,
    pub internal_rom_name: String,
    pub map_mode:          MapMode,
    pub rom_type:          Option<RomType>,
    pub rom_size:          u8,
    pub sram_size:         u8,
    pub region_code:       Option<RegionCode>,
    pub developer_id:      u8,
    pub version_number:    u8,
    pub checksum:          u16,
    pub native_vectors:    VectorTable,
    pub emulation_vectors: VectorTable,
}

/// Interrupt vectors as stored in the header. Native mode has no RESET entry and emulation mode
/// no BRK entry; those slots hold whatever the image has there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorTable {
    pub cop:   u16,
    pub brk:   u16,
    pub abort: u16,
    pub nmi:   u16,
    pub reset: u16,
    pub irq:   u16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MapMode {
    SlowLoRom   = 0b100000,
    SlowHiRom   = 0b100001,
    SlowExLoRom = 0b100010,
    SlowExHiRom = 0b100101,
    FastLoRom   = 0b110000,
    FastHiRom   = 0b110001,
    FastExLoRom = 0b110010,
    FastExHiRom = 0b110101,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RomType {
    Rom               = 0x00,
    RomRam            = 0x01,
    RomRamSram        = 0x02,

    RomDsp            = 0x03,
    RomSuperFx        = 0x13,
    RomObc1           = 0x23,
    RomSa1            = 0x33,
    RomSdd1           = 0x43,
    RomSrtc           = 0x53,
    RomOther          = 0xE3,
    RomCustom         = 0xF3,

    RomDspRam         = 0x04,
    RomSuperFxRam     = 0x14,
    RomObc1Ram        = 0x24,
    RomSa1Ram         = 0x34,
    RomSdd1Ram        = 0x44,
    RomSRtcRam        = 0x54,
    RomOtherRam       = 0xE4,
    RomCustomRam      = 0xF4,

    RomDspRamSram     = 0x05,
    RomSuperFxRamSram = 0x15,
    RomObc1RamSram    = 0x25,
    RomSa1RamSram     = 0x35,
    RomSdd1RamSram    = 0x45,
    RomSRtcRamSram    = 0x55,
    RomOtherRamSram   = 0xE5,
    RomCustomRamSram  = 0xF5,

    RomDspSram        = 0x06,
    RomSuperFxSram    = 0x16,
    RomObc1Sram       = 0x26,
    RomSa1Sram        = 0x36,
    RomSdd1Sram       = 0x46,
    RomSRtcSram       = 0x56,
    RomOtherSram      = 0xE6,
    RomCustomSram     = 0xF6,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum RegionCode {
    Japan        = 0x00,
    NorthAmerica = 0x01,
    Europe       = 0x02,
    Sweden       = 0x03,
    Finland      = 0x04,
    Denmark      = 0x05,
    France       = 0x06,
    Netherlands  = 0x07,
    Spain        = 0x08,
    Germany      = 0x09,
    Italy        = 0x0A,
    China        = 0x0B,
    Indonesia    = 0x0C,
    Korea        = 0x0D,
    Global       = 0x0E,
    Canada       = 0x0F,
    Brazil       = 0x10,
    Australia    = 0x11,
    Other1       = 0x12,
    Other2       = 0x13,
    Other3       = 0x14,
}

// -------------------------------------------------------------------------------------------------

impl RomInternalHeader {
    pub fn parse(rom: &Rom) -> Result<Self, InternalHeaderError> {
        let location = Self::find(rom)?;

        let internal_rom_name = rom
            .parse(
                location,
                sizes::INTERNAL_ROM_NAME,
                map(take(sizes::INTERNAL_ROM_NAME), |s: &[u8]| String::from_utf8_lossy(s).trim_end().to_string()),
            )
            .map_err(InternalHeaderError::ReadRomName)?;

        let info = rom
            .slice(location + offsets::MAP_MODE, offsets::COMPLEMENT_CHECK - offsets::MAP_MODE)
            .map_err(InternalHeaderError::ReadInfo)?;
        let info = |offset: usize| info[offset - offsets::MAP_MODE];

        let map_mode =
            MapMode::try_from(info(offsets::MAP_MODE)).map_err(|e| InternalHeaderError::UnsupportedMapMode(e.number))?;

        let checksum = rom
            .parse(location + offsets::CHECKSUM, 2, le_u16)
            .map_err(|source| InternalHeaderError::ReadChecksum { location, source })?;

        let parse_vectors = |at: usize| {
            rom.parse(at, 2 * 6, count(le_u16, 6)).map(|v| VectorTable {
                cop:   v[0],
                brk:   v[1],
                abort: v[2],
                nmi:   v[3],
                reset: v[4],
                irq:   v[5],
            })
        };
        let native_vectors = parse_vectors(location + offsets::NATIVE_VECTORS)
            .map_err(InternalHeaderError::ReadInterruptVectors)?;
        let emulation_vectors = parse_vectors(location + offsets::EMULATION_VECTORS)
            .map_err(InternalHeaderError::ReadInterruptVectors)?;

        Ok(Self {
            location,
            internal_rom_name,
            map_mode,
            rom_type: RomType::try_from(info(offsets::ROM_TYPE)).ok(),
            rom_size: info(offsets::ROM_SIZE),
            sram_size: info(offsets::SRAM_SIZE),
            region_code: RegionCode::try_from(info(offsets::REGION_CODE)).ok(),
            developer_id: info(offsets::DEVELOPER_ID),
            version_number: info(offsets::VERSION_NUMBER),
            checksum,
            native_vectors,
            emulation_vectors,
        })
    }

    /// Picks the first location whose checksum and complement add up. Failing that, the first
    /// location with a known map mode byte.
    fn find(rom: &Rom) -> Result<usize, InternalHeaderError> {
        let candidates = HEADER_LOCATIONS.iter().filter(|(location, _)| location + sizes::INTERNAL_HEADER <= rom.len());

        for &(location, name) in candidates.clone() {
            let (cpl, csm) = rom
                .parse(location + offsets::COMPLEMENT_CHECK, 4, pair(le_u16, le_u16))
                .map_err(|source| InternalHeaderError::ReadChecksum { location, source })?;
            if (csm ^ cpl) == 0xFFFF {
                log::info!("Internal ROM header found at {name} location: {location:#X}");
                return Ok(location);
            }
        }

        for &(location, name) in candidates {
            let map_mode = rom.parse(location + offsets::MAP_MODE, 1, le_u8).ok();
            if map_mode.map_or(false, |b| MapMode::try_from(b).is_ok()) {
                log::warn!("No internal ROM header with a valid checksum, falling back to {name} location: {location:#X}");
                return Ok(location);
            }
        }

        log::error!("Couldn't find internal ROM header due to invalid checksums and map modes");
        Err(InternalHeaderError::NotFound)
    }

    pub fn rom_size_in_kb(&self) -> u32 {
        let exponent = self.rom_size as u32;
        2u32.saturating_pow(exponent)
    }

    pub fn sram_size_in_kb(&self) -> u32 {
        match self.sram_size as u32 {
            0 => 0,
            exponent => 2u32.saturating_pow(exponent),
        }
    }

    /// Battery-backed RAM to allocate: `1 KiB << sram_size`, capped at 256 KiB.
    pub fn sram_size_in_bytes(&self) -> usize {
        match self.sram_size {
            0 => 0,
            exponent => 0x400 << exponent.min(8),
        }
    }
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use MapMode::*;
        write!(f, "{}", match self {
            SlowLoRom => "LoROM",
            SlowHiRom => "HiROM",
            SlowExLoRom => "ExLoROM",
            SlowExHiRom => "ExHiROM",
            FastLoRom => "Fast LoROM",
            FastHiRom => "Fast HiROM",
            FastExLoRom => "Fast ExLoROM",
            FastExHiRom => "Fast ExHiROM",
        })
    }
}

#[rustfmt::skip]
impl MapMode {
    pub fn as_u8(&self) -> u8 { (*self).into() }
    pub fn is_hirom(&self)   -> bool { (self.as_u8() & 0b000001) != 0 }
    pub fn is_exlorom(&self) -> bool { (self.as_u8() & 0b000010) != 0 }
    pub fn is_exhirom(&self) -> bool { (self.as_u8() & 0b000100) != 0 }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use RegionCode::*;
        write!(f, "{}", match self {
            Japan => "Japan",
            NorthAmerica => "North America",
            Europe => "Europe",
            Sweden => "Sweden",
            Finland => "Finland",
            Denmark => "Denmark",
            France => "France",
            Netherlands => "Netherlands",
            Spain => "Spain",
            Germany => "Germany",
            Italy => "Italy",
            China => "China",
            Indonesia => "Indonesia",
            Korea => "Korea",
            Global => "Global",
            Canada => "Canada",
            Brazil => "Brazil",
            Australia => "Australia",
            Other1 => "Other (1)",
            Other2 => "Other (2)",
            Other3 => "Other (3)",
        })
    }
}
