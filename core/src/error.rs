use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

/// Everything that can stop a Chip-8 program from running.
///
/// None of these are recoverable; a Chip-8 program is deterministic so retrying
/// would fault in exactly the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("ROM is {size} bytes but at most {max} fit in memory", max = MAX_ROM_SIZE)]
    RomTooLarge { size: usize },

    #[error("unsupported opcode {opcode:#06X} at {address:#05X}")]
    UnsupportedOpcode { opcode: u16, address: u16 },

    #[error("stack overflow calling from {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow returning from {address:#05X}")]
    StackUnderflow { address: u16 },

    #[error("program counter {pc:#06X} is outside of memory")]
    ProgramCounterOutOfBounds { pc: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
