use thiserror::Error;

use crate::{
    address::{Address, AddressError},
    opcodes::Mode,
};

/// Failure reported by a [`Mem`](crate::Mem) implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error("Cartridge has nothing mapped at {0}")]
    UnmappedCartridgeRead(Address),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("Unknown opcode {opcode:#04X} at {address}")]
    UnknownOpcode { opcode: u8, address: Address },
    #[error("Opcode {opcode:#04X} has no operand of the requested kind in mode {mode:?}")]
    InvalidOperand { opcode: u8, mode: Mode },
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),
}
