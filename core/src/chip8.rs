use std::time::Duration;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::MEMORY_SIZE;
use crate::display::Display;
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::operations::{self, ProgramCounter};
use crate::state::State;
use crate::timer::Clock;

/// What the Chip8 is doing after a step
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    /// blocked on FX0A until any key is latched
    WaitingForKey,
    /// the program executed 00FD; nothing further will run
    Halted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Running,
    WaitingForKey { register: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether execution is blocked on a key press
///  - the first fault, after which it refuses to run
///  - the instruction and timer clocks
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU, either one instruction at a time or by elapsed time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    mode: Mode,
    config: Config,
    rng: StdRng,
    fault: Option<Error>,
    cpu_clock: Clock,
    timer_clock: Clock,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8::with_rng(config, StdRng::from_entropy())
    }

    /// A Chip8 whose CXKK instructions produce a reproducible sequence
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Chip8::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            mode: Mode::Running,
            config,
            rng,
            fault: None,
            cpu_clock: Clock::new(config.instructions_per_second),
            timer_clock: Clock::new(config.timer_hz),
        }
    }

    /// Load a rom into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw contents of a ROM, at most 0xE00 bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_rom(rom)?;
        debug!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Returns the Display if it should be redrawn
    pub fn frame(&self) -> Option<&Display> {
        if self.state.draw_flag {
            Some(&self.state.display)
        } else {
            None
        }
    }

    /// Returns the Display if it should be redrawn and marks it as drawn
    pub fn take_frame(&mut self) -> Option<&Display> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.display)
        } else {
            None
        }
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.set_key(key, false);
    }

    /// Unset the pressed status of every key
    pub fn release_keys(&mut self) {
        self.state.keypad.release_all();
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound > 0
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn status(&self) -> Status {
        if self.state.halted {
            Status::Halted
        } else if let Mode::WaitingForKey { .. } = self.mode {
            Status::WaitingForKey
        } else {
            Status::Running
        }
    }

    /// Advances the CPU by a single cycle
    /// - does nothing once halted
    /// - returns the first fault again if one has happened
    /// - while awaiting a keypress, checks the keypad instead of executing
    /// - otherwise gets and executes the next opcode
    pub fn step(&mut self) -> Result<Status> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        if self.state.halted {
            return Ok(Status::Halted);
        }

        let result = match self.mode {
            Mode::WaitingForKey { register } => {
                self.check_for_key(register);
                Ok(())
            }
            Mode::Running => self.execute_next(),
        };

        match result {
            Ok(()) => Ok(self.status()),
            Err(fault) => {
                self.fault = Some(fault);
                Err(fault)
            }
        }
    }

    /// Decrements the delay and sound timers once, as happens at 60Hz
    pub fn tick_timers(&mut self) {
        let was_sounding = self.sound_active();
        self.state.timers.tick();
        if was_sounding && !self.sound_active() {
            trace!("sound timer expired");
        }
    }

    /// Runs every instruction and timer tick owed for `elapsed` time, in the order
    /// they fall due. The two clocks are independent: timers tick at `timer_hz`
    /// however many instructions run per second.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Status> {
        let mut remaining = elapsed;
        loop {
            while self.timer_clock.take_tick() {
                self.tick_timers();
            }
            while self.cpu_clock.take_tick() {
                if self.step()? == Status::Halted {
                    return Ok(Status::Halted);
                }
            }
            if remaining == Duration::from_secs(0) {
                return Ok(self.status());
            }

            let slice = remaining
                .min(self.cpu_clock.until_tick())
                .min(self.timer_clock.until_tick());
            self.cpu_clock.accumulate(slice);
            self.timer_clock.accumulate(slice);
            remaining -= slice;
        }
    }

    fn check_for_key(&mut self, register: u8) {
        if let Some(key) = self.state.keypad.first_pressed() {
            debug!("key {:X} pressed, storing in V{:X}", key, register);
            self.state.v[register as usize] = key;
            self.state.pc += 0x2;
            self.mode = Mode::Running;
        }
    }

    fn execute_next(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.get_op()?;
        let instruction = Instruction::from_op(op);
        trace!(
            "{:03X}: {:04X} {:?} v{:02X?} i{:04X}",
            pc,
            op,
            instruction,
            self.state.v,
            self.state.i
        );

        let next = operations::execute(
            op,
            instruction,
            &mut self.state,
            &self.config,
            &mut self.rng,
        )?;
        self.state.pc = match next {
            ProgramCounter::Next => pc + 0x2,
            ProgramCounter::Skip => pc + 0x4,
            ProgramCounter::Jump(addr) => addr,
            ProgramCounter::Wait(register) => {
                debug!("waiting for a key to store in V{:X}", register);
                self.mode = Mode::WaitingForKey { register };
                pc
            }
        };
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16> {
        let pc = self.state.pc;
        if pc as usize + 1 >= MEMORY_SIZE {
            return Err(Error::ProgramCounterOutOfBounds { pc });
        }
        let memory = &self.state.memory;
        Ok(u16::from_be_bytes([memory.read(pc), memory.read(pc + 1)]))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quirks;

    fn chip8_with(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Config::default(), 0);
        chip8.load_rom(rom).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Ok(0xAABB));
    }

    #[test]
    fn test_starts_at_program_start() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.status(), Status::Running);
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        let starting_pc = chip8.state.pc;
        assert_eq!(chip8.step(), Ok(Status::Running));
        assert_eq!(chip8.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_skip_advances_past_next_instruction() {
        let mut chip8 = chip8_with(&[0x30, 0x00]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        assert_eq!(chip8.step(), Ok(Status::WaitingForKey));
        assert_eq!(chip8.state.pc, 0x200);
        // memory changing under the wait must not be re-decoded
        chip8.state.memory.write(0x200, 0x00);
        chip8.state.memory.write(0x201, 0xFD);
        assert_eq!(chip8.step(), Ok(Status::WaitingForKey));
        assert_eq!(chip8.state.pc, 0x200);
        assert!(!chip8.is_halted());
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.key_press(0xE);
        assert_eq!(chip8.step(), Ok(Status::Running));
        assert_eq!(chip8.state.v[0x1], 0xE);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_released_key_doesnt_satisfy_wait() {
        let mut chip8 = chip8_with(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.key_press(0x3);
        chip8.key_release(0x3);
        assert_eq!(chip8.step(), Ok(Status::WaitingForKey));
    }

    #[test]
    fn test_timers_run_while_waiting_for_key() {
        let mut chip8 = chip8_with(&[0x60, 0x05, 0xF0, 0x15, 0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.tick_timers();
        assert_eq!(chip8.delay_timer(), 0x4);
        assert_eq!(chip8.status(), Status::WaitingForKey);
    }

    #[test]
    fn test_halts() {
        let mut chip8 = chip8_with(&[0x00, 0xFD, 0x60, 0x01]);
        assert_eq!(chip8.step(), Ok(Status::Halted));
        assert_eq!(chip8.step(), Ok(Status::Halted));
        assert_eq!(chip8.state.v[0x0], 0x0);
    }

    #[test]
    fn test_faults_are_latched() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        let fault = Error::StackUnderflow { address: 0x200 };
        assert_eq!(chip8.step(), Err(fault));
        assert_eq!(chip8.step(), Err(fault));
    }

    #[test]
    fn test_pc_out_of_bounds() {
        let mut chip8 = Chip8::new();
        chip8.state.pc = 0xFFF;
        assert_eq!(
            chip8.step(),
            Err(Error::ProgramCounterOutOfBounds { pc: 0xFFF })
        );
    }

    #[test]
    fn test_jump_offset_past_memory_faults_on_fetch() {
        // V0 = 0xFF; jump to 0xFFF + V0
        let mut chip8 = chip8_with(&[0x60, 0xFF, 0xBF, 0xFF]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(
            chip8.step(),
            Err(Error::ProgramCounterOutOfBounds { pc: 0x10FE })
        );
    }

    #[test]
    fn test_take_frame_clears_draw_flag() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        assert!(chip8.frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.frame().is_some());
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_advance_runs_clocks_independently() {
        // an infinite loop: jump to self
        let config = Config {
            instructions_per_second: 600,
            timer_hz: 60,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_seed(config, 0);
        chip8.load_rom(&[0x12, 0x00]).unwrap();
        chip8.state.timers.delay = 100;
        chip8.advance(Duration::from_millis(500)).unwrap();
        assert_eq!(chip8.delay_timer(), 70);
    }

    #[test]
    fn test_advance_runs_owed_instructions() {
        let config = Config {
            instructions_per_second: 100,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_seed(config, 0);
        // V0 += 1, jump back
        chip8.load_rom(&[0x70, 0x01, 0x12, 0x00]).unwrap();
        chip8.advance(Duration::from_millis(95)).unwrap();
        assert_eq!(chip8.state.v[0x0], 5);
        chip8.advance(Duration::from_millis(5)).unwrap();
        assert_eq!(chip8.state.v[0x0], 5);
        chip8.advance(Duration::from_millis(10)).unwrap();
        assert_eq!(chip8.state.v[0x0], 6);
    }

    #[test]
    fn test_advance_returns_above_a_gigahertz() {
        let config = Config {
            instructions_per_second: 2_000_000_000,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_seed(config, 0);
        chip8.load_rom(&[0x12, 0x00]).unwrap();
        assert_eq!(chip8.advance(Duration::from_micros(100)), Ok(Status::Running));
        assert_eq!(chip8.state.pc, 0x200);
    }

    #[test]
    fn test_advance_stops_on_fault() {
        let mut chip8 = chip8_with(&[0x00, 0x00]);
        assert_eq!(
            chip8.advance(Duration::from_millis(100)),
            Err(Error::UnsupportedOpcode {
                opcode: 0x0000,
                address: 0x200
            })
        );
    }

    #[test]
    fn test_quirks_reach_operations() {
        let config = Config {
            quirks: Quirks {
                shift_reads_vy: true,
                ..Quirks::default()
            },
            ..Config::default()
        };
        let mut chip8 = Chip8::with_seed(config, 0);
        // V1 = 0x80; V0 = V1 << 1
        chip8.load_rom(&[0x61, 0x80, 0x80, 0x1E]).unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.state.v[0x0], 0x00);
        assert_eq!(chip8.state.v[0xF], 0x1);
    }
}
