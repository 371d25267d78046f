use std::io;

use serde::{Deserialize, Serialize};
use snesplay_rom::CartridgeError;
use thiserror::Error;
use wdc65816::CpuState;

use crate::bus::BusState;

const COMPRESSION_LEVEL: i32 = 3;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Encoding state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Compressing state: {0}")]
    Io(#[from] io::Error),
    #[error("State carries SRAM but no cartridge is inserted")]
    NoCartridge,
    #[error("Restoring SRAM:\n- {0}")]
    Sram(#[from] CartridgeError),
    #[error("State {what} has {actual} bytes, expected {expected}")]
    Size { what: &'static str, expected: usize, actual: usize },
}

impl StateError {
    pub(crate) fn check_size(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if actual == expected {
            Ok(())
        } else {
            Err(StateError::Size { what, expected, actual })
        }
    }
}

/// A full snapshot taken between two ticks. Loading it into a console running the same cartridge
/// continues exactly as the saved one would have.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleState {
    pub cpu: CpuState,
    pub bus: BusState,
}

impl ConsoleState {
    /// zstd-compressed JSON
    pub fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        let json = serde_json::to_vec(self)?;
        Ok(zstd::encode_all(json.as_slice(), COMPRESSION_LEVEL)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let json = zstd::decode_all(bytes)?;
        Ok(serde_json::from_slice(&json)?)
    }
}
