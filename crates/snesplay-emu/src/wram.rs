use serde::{Deserialize, Serialize};

pub const WRAM_SIZE: usize = 0x20000;

/// The 128 KiB of work RAM, plus the auto-incrementing WMDATA/WMADD port on the B-bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wram {
    data: Vec<u8>,
    /// 17-bit WMADD
    port: u32,
}

impl Default for Wram {
    fn default() -> Self {
        Self { data: vec![0; WRAM_SIZE], port: 0 }
    }
}

impl Wram {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn read(&self, index: usize) -> u8 {
        self.data[index % WRAM_SIZE]
    }

    pub fn write(&mut self, index: usize, value: u8) {
        self.data[index % WRAM_SIZE] = value;
    }

    pub fn port_address(&self) -> u32 {
        self.port
    }

    /// WMADDL/M/H. `byte` 0 is the low byte; only bit 0 of the high byte is kept.
    pub fn set_port_byte(&mut self, byte: u8, value: u8) {
        let shift = 8 * byte as u32;
        self.port = (self.port & !(0xFF << shift) | (value as u32) << shift) & (WRAM_SIZE as u32 - 1);
    }

    pub fn peek_port(&self) -> u8 {
        self.read(self.port as usize)
    }

    pub fn read_port(&mut self) -> u8 {
        let value = self.peek_port();
        self.advance_port();
        value
    }

    pub fn write_port(&mut self, value: u8) {
        self.write(self.port as usize, value);
        self.advance_port();
    }

    fn advance_port(&mut self) {
        self.port = (self.port + 1) & (WRAM_SIZE as u32 - 1);
    }
}
