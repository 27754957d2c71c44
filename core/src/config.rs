use crate::constants::{CLOCK_SPEED, TIMER_SPEED};

/// # Quirks
/// Chip-8 interpreters disagree on a handful of opcodes and some ROMs depend on one
/// particular interpretation. The defaults follow the documented standard behavior.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE shift Vy into Vx instead of shifting Vx in place
    pub shift_reads_vy: bool,
    /// FX55/FX65 leave I pointing past the last register transferred
    pub memory_increments_index: bool,
    /// BNNN jumps to NNN + Vx (x being the high nibble of NNN) instead of NNN + V0
    pub jump_with_vx: bool,
    /// sprites wrap around the screen edges instead of being clipped
    pub wrap_sprites: bool,
}

/// Settings fixed for the lifetime of a Chip8
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// enables the superset opcodes (scrolling, high resolution, large font, HP flags)
    pub extended: bool,
    pub instructions_per_second: u32,
    pub timer_hz: u32,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extended: false,
            instructions_per_second: CLOCK_SPEED,
            timer_hz: TIMER_SPEED,
            quirks: Quirks::default(),
        }
    }
}
