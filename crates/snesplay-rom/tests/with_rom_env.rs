use std::env;

use snesplay_rom::{Cartridge, Rom};

#[test]
#[ignore]
fn test_with_rom_env() {
    let rom_path = env::var_os("ROM_PATH").expect("ROM_PATH not set");
    assert!(std::fs::metadata(&rom_path).expect("ROM_PATH invalid").is_file());
    let rom = Rom::from_file(rom_path).expect("Rom read error encountered");
    Cartridge::new(rom).expect("Cartridge parse error encountered");
}
