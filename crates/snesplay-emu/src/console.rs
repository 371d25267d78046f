use snesplay_rom::{Cartridge, CartridgeError};
use thiserror::Error;
use wdc65816::{Cpu, CpuError};

use crate::{
    bus::Bus,
    state::{ConsoleState, StateError},
};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Loading cartridge:\n- {0}")]
    Cartridge(#[from] CartridgeError),
    #[error("CPU error:\n- {0}")]
    Cpu(#[from] CpuError),
    #[error("Save state:\n- {0}")]
    State(#[from] StateError),
}

/// CPU and bus wired together. The bus is handed to the CPU for the duration of each tick.
#[derive(Clone, Default)]
pub struct Console {
    pub cpu: Cpu,
    pub bus: Bus,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the cartridge contained in `bytes` and resets.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<(), ConsoleError> {
        let cart = Cartridge::from_bytes(bytes)?;
        self.insert(cart)
    }

    pub fn insert(&mut self, cart: Cartridge) -> Result<(), ConsoleError> {
        log::info!("Inserting cartridge \"{}\" ({})", cart.title(), cart.mapper());
        self.bus.insert_cartridge(cart);
        self.reset()
    }

    pub fn reset(&mut self) -> Result<(), ConsoleError> {
        log::info!("Console reset");
        self.bus.reset();
        self.cpu.reset(&mut self.bus)?;
        Ok(())
    }

    /// Runs one instruction, or services one interrupt, and returns the cycles it took including
    /// any DMA it started.
    pub fn tick(&mut self) -> Result<u32, ConsoleError> {
        let cy = self.cpu.tick(&mut self.bus)?;
        Ok(cy + self.bus.take_stall())
    }

    /// Vblank notification. Sets the RDNMI flag and raises NMI if NMITIMEN enables it.
    pub fn request_nmi(&mut self) {
        self.bus.io.set_nmi_flag();
        if self.bus.io.nmi_enabled() {
            self.cpu.trigger_nmi();
        }
    }

    pub fn request_irq(&mut self) {
        self.cpu.trigger_irq();
    }

    pub fn save_state(&self) -> ConsoleState {
        ConsoleState { cpu: self.cpu.save_state(), bus: self.bus.save_state() }
    }

    pub fn load_state(&mut self, state: &ConsoleState) -> Result<(), ConsoleError> {
        self.bus.load_state(&state.bus)?;
        self.cpu.load_state(&state.cpu);
        Ok(())
    }
}
