//! A Chip-8 interpreter core: machine state, decoding and execution, with an
//! optional extended instruction set (scrolling, 128x64 display, large font).
//!
//! Rendering, input and ROM files are left to the caller, which drives a
//! `Chip8` through `load_rom`, `step`/`tick_timers` (or `advance`), the key
//! latches and the frame accessors.

pub use chip8::{Chip8, Status};
pub use config::{Config, Quirks};
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use display::{Display, FrameBuffer};
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use timer::{Clock, Timers};

mod chip8;
mod config;
pub mod constants;
mod display;
mod error;
mod instruction;
mod keypad;
mod memory;
pub mod opcode;
mod operations;
pub mod state;
mod timer;
