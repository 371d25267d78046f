//! A headless SNES: the 65816 core wired to work RAM, the CPU I/O registers, DMA and a cartridge.
//! Video and audio are left to external collaborators, which see their registers through the
//! latched B-bus window.

pub mod bus;
pub mod config;
pub mod console;
pub mod io;
pub mod state;
pub mod wram;

pub use crate::{
    bus::{Bus, BusState},
    config::ConsoleConfig,
    console::{Console, ConsoleError},
    io::{CpuIo, DmaChannel},
    state::{ConsoleState, StateError},
    wram::{Wram, WRAM_SIZE},
};
