use crate::constants::{HP_FLAG_COUNT, PROGRAM_START, STACK_DEPTH};
use crate::display::Display;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::timer::Timers;

/// A snapshot of the Chip-8 machine
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry, borrow and collision flag
/// - (i) a 16-bit memory address register; only its low 12 bits address memory
///
/// Counter
/// - (pc) a 16-bit program counter pointing at the first byte of the next instruction
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), see `Timers`
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory, see `Memory`
/// - the display's frame buffer, see `Display`
/// - 8 HP48 flag registers for FX75/FX85
///
/// ## Input
/// - 16 key latches, see `Keypad`
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub timers: Timers,
    pub memory: Memory,
    pub display: Display,
    pub keypad: Keypad,
    pub hp_flags: [u8; HP_FLAG_COUNT],
    pub draw_flag: bool,
    pub halted: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            timers: Timers::default(),
            memory: Memory::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            hp_flags: [0; HP_FLAG_COUNT],
            draw_flag: false,
            halted: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
