use snesplay_rom::{Cartridge, CartridgeError, Mapper, SMC_HEADER_SIZE};
use wdc65816::Address;

const COMPLEMENT_AND_CHECKSUM: [u8; 4] = [0x00, 0x00, 0xFF, 0xFF];

fn image(size: usize, header_at: usize, map_mode: u8, sram_size: u8) -> Vec<u8> {
    let mut data: Vec<u8> = (0..size).map(|i| (i >> 16) as u8).collect();
    let header = &mut data[header_at..header_at + 0x40];
    header[..21].copy_from_slice(b"SYNTHETIC            ");
    header[0x15] = map_mode;
    header[0x18] = sram_size;
    header[0x1C..0x20].copy_from_slice(&COMPLEMENT_AND_CHECKSUM);
    header[0x3C..0x3E].copy_from_slice(&0x8000u16.to_le_bytes());
    data
}

#[test]
fn lorom_image() {
    let cart = Cartridge::from_bytes(image(0x80000, 0x7FC0, 0x20, 0x03)).unwrap();
    assert_eq!(cart.mapper(), Mapper::LoRom);
    assert_eq!(cart.title(), "SYNTHETIC");
    assert_eq!(cart.sram().len(), 0x2000);
    assert_eq!(cart.read(Address::new(0x00, 0xFFFD)), Ok(0x80));
    assert_eq!(cart.read(Address::new(0x02, 0x8000)), Ok(0x01));
    assert_eq!(cart.read(Address::new(0x82, 0x8000)), Ok(0x01));
}

#[test]
fn hirom_image_with_copier_header() {
    let mut data = vec![0; SMC_HEADER_SIZE];
    data.extend(image(0x40000, 0xFFC0, 0x31, 0x01));
    let mut cart = Cartridge::from_bytes(data).unwrap();
    assert_eq!(cart.mapper(), Mapper::HiRom);
    assert_eq!(cart.read(Address::new(0xC1, 0x0000)), Ok(0x01));
    assert_eq!(cart.read(Address::new(0x01, 0x8000)), Ok(0x01));

    let sram = Address::new(0x30, 0x6000);
    assert!(cart.claims_expansion(sram));
    cart.write(sram, 0x5A);
    assert_eq!(cart.read(sram), Ok(0x5A));
}

#[test]
fn exlorom_has_no_mapping() {
    let result = Cartridge::from_bytes(image(0x10000, 0x7FC0, 0x32, 0));
    assert!(matches!(result, Err(CartridgeError::UnsupportedMapping(0x32))));
}
