use log::warn;

use crate::constants::{
    LARGE_SPRITE_SHEET, LARGE_SPRITE_SHEET_START, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START,
    SPRITE_SHEET, SPRITE_SHEET_MIRROR_START, SPRITE_SHEET_START,
};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - 0x000..0x050 the small sprite sheet
/// - 0x050..0x0A0 a copy of the small sprite sheet
/// - 0x0A0..0x140 the large sprite sheet
/// - 0x000..0x200 is reserved for the interpreter and can't be written by programs
/// - 0x200..0x1000 program code and data
///
/// Addresses wrap at 4096 since only their low 12 bits are meaningful.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        for start in [SPRITE_SHEET_START, SPRITE_SHEET_MIRROR_START].iter() {
            let start = *start as usize;
            bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        }
        let large = LARGE_SPRITE_SHEET_START as usize;
        bytes[large..large + LARGE_SPRITE_SHEET.len()].copy_from_slice(&LARGE_SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a ROM into memory starting at `PROGRAM_START`
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[Memory::wrap(address)]
    }

    /// Writes a program byte; writes into the interpreter region are dropped
    pub fn write(&mut self, address: u16, value: u8) {
        let address = Memory::wrap(address);
        if address < PROGRAM_START as usize {
            warn!(
                "dropped write of {:#04X} to reserved address {:#05X}",
                value, address
            );
            return;
        }
        self.bytes[address] = value;
    }

    /// The whole of memory, for inspection
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn wrap(address: u16) -> usize {
        address as usize % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
