use log::{debug, info};
use rand::Rng;

use crate::config::{Config, Quirks};
use crate::constants::{
    HP_FLAG_COUNT, LARGE_SPRITE_SHEET_START, LARGE_SPRITE_SIZE, SPRITE_SHEET_START, SPRITE_SIZE,
    STACK_DEPTH,
};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::state::State;

/// Where the program counter goes after an instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgramCounter {
    /// to the following instruction
    Next,
    /// over the following instruction
    Skip,
    /// to an address
    Jump(u16),
    /// nowhere until a key is pressed, which is then stored in Vx
    Wait(u8),
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> Self {
        if condition {
            ProgramCounter::Skip
        } else {
            ProgramCounter::Next
        }
    }
}

/// Applies an instruction to the state.
///
/// `state.pc` must still point at the instruction; the returned `ProgramCounter` says
/// where it should go next. `op` is only used to report unsupported opcodes.
pub fn execute(
    op: u16,
    instruction: Instruction,
    state: &mut State,
    config: &Config,
    rng: &mut impl Rng,
) -> Result<ProgramCounter> {
    use Instruction::*;

    if instruction.is_extended() && !config.extended {
        return Err(unsupported(op, state));
    }

    let quirks = &config.quirks;
    match instruction {
        Clear => Ok(clr(state)),
        Return => rts(state),
        Halt => Ok(halt(state)),
        Jump { addr } => Ok(ProgramCounter::Jump(addr)),
        Call { addr } => call(state, addr),
        SkipEqual { x, kk } => Ok(ProgramCounter::skip_if(state.v[x as usize] == kk)),
        SkipNotEqual { x, kk } => Ok(ProgramCounter::skip_if(state.v[x as usize] != kk)),
        SkipRegistersEqual { x, y } => Ok(ProgramCounter::skip_if(
            state.v[x as usize] == state.v[y as usize],
        )),
        Load { x, kk } => Ok(load(state, x, kk)),
        Add { x, kk } => Ok(add(state, x, kk)),
        Move { x, y } => Ok(mv(state, x, y)),
        Or { x, y } => Ok(or(state, x, y)),
        And { x, y } => Ok(and(state, x, y)),
        Xor { x, y } => Ok(xor(state, x, y)),
        AddRegisters { x, y } => Ok(addr(state, x, y)),
        Sub { x, y } => Ok(sub(state, x, y)),
        ShiftRight { x, y } => Ok(shr(state, x, y, quirks)),
        SubReverse { x, y } => Ok(subn(state, x, y)),
        ShiftLeft { x, y } => Ok(shl(state, x, y, quirks)),
        SkipRegistersNotEqual { x, y } => Ok(ProgramCounter::skip_if(
            state.v[x as usize] != state.v[y as usize],
        )),
        LoadIndex { addr } => Ok(loadi(state, addr)),
        JumpOffset { x, addr } => Ok(jumpi(state, x, addr, quirks)),
        Random { x, kk } => Ok(rnd(state, x, kk, rng)),
        Draw { x, y, n } => Ok(draw(state, x, y, n, config)),
        SkipPressed { x } => Ok(ProgramCounter::skip_if(
            state.keypad.is_pressed(state.v[x as usize]),
        )),
        SkipNotPressed { x } => Ok(ProgramCounter::skip_if(
            !state.keypad.is_pressed(state.v[x as usize]),
        )),
        LoadDelay { x } => Ok(moved(state, x)),
        WaitKey { x } => Ok(ProgramCounter::Wait(x)),
        SetDelay { x } => Ok(loads(state, x)),
        SetSound { x } => Ok(ld(state, x)),
        AddIndex { x } => Ok(addi(state, x)),
        LoadSprite { x } => Ok(ldspr(state, x)),
        Bcd { x } => Ok(bcd(state, x)),
        Store { x } => Ok(stor(state, x, quirks)),
        Read { x } => Ok(read(state, x, quirks)),
        ScrollDown { n } => Ok(scd(state, n)),
        ScrollRight => Ok(scr(state)),
        ScrollLeft => Ok(scl(state)),
        LowRes => Ok(res(state, false)),
        HighRes => Ok(res(state, true)),
        LoadLargeSprite { x } => Ok(ldhspr(state, x)),
        SaveFlags { x } => Ok(savef(state, x)),
        LoadFlags { x } => Ok(loadf(state, x)),
        Unsupported(op) => Err(unsupported(op, state)),
    }
}

fn unsupported(op: u16, state: &State) -> Error {
    Error::UnsupportedOpcode {
        opcode: op,
        address: state.pc,
    }
}

/// clear
fn clr(state: &mut State) -> ProgramCounter {
    state.display.clear();
    state.draw_flag = true;
    ProgramCounter::Next
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<ProgramCounter> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow { address: state.pc });
    }
    state.sp -= 1;
    Ok(ProgramCounter::Jump(state.stack[state.sp as usize]))
}

/// stop executing
fn halt(state: &mut State) -> ProgramCounter {
    info!("program halted at {:#05X}", state.pc);
    state.halted = true;
    ProgramCounter::Next
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<ProgramCounter> {
    if state.sp as usize == STACK_DEPTH {
        return Err(Error::StackOverflow { address: state.pc });
    }
    state.stack[state.sp as usize] = state.pc + 0x2;
    state.sp += 1;
    Ok(ProgramCounter::Jump(addr))
}

/// Vx = kk
fn load(state: &mut State, x: u8, kk: u8) -> ProgramCounter {
    state.v[x as usize] = kk;
    ProgramCounter::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
fn add(state: &mut State, x: u8, kk: u8) -> ProgramCounter {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    ProgramCounter::Next
}

/// Vx = Vy
fn mv(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] = state.v[y as usize];
    ProgramCounter::Next
}

/// Vx |= Vy
fn or(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] |= state.v[y as usize];
    ProgramCounter::Next
}

/// Vx &= Vy
fn and(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] &= state.v[y as usize];
    ProgramCounter::Next
}

/// Vx ^= Vy
fn xor(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    state.v[x as usize] ^= state.v[y as usize];
    ProgramCounter::Next
}

// The flag-setting arithmetic below writes VF last so the flag survives when x is F.

/// Vx += Vy; VF = overflow
fn addr(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = over as u8;
    ProgramCounter::Next
}

/// Vx -= Vy; VF = !underflow
fn sub(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vx.wrapping_sub(vy);
    state.v[0xF] = (vx >= vy) as u8;
    ProgramCounter::Next
}

/// Vx >>= 1; VF = the bit shifted out
fn shr(state: &mut State, x: u8, y: u8, quirks: &Quirks) -> ProgramCounter {
    let source = if quirks.shift_reads_vy { y } else { x };
    let value = state.v[source as usize];
    state.v[x as usize] = value >> 1;
    state.v[0xF] = value & 0x1;
    ProgramCounter::Next
}

/// Vx = Vy - Vx; VF = !underflow
fn subn(state: &mut State, x: u8, y: u8) -> ProgramCounter {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vy.wrapping_sub(vx);
    state.v[0xF] = (vy >= vx) as u8;
    ProgramCounter::Next
}

/// Vx <<= 1; VF = the bit shifted out
fn shl(state: &mut State, x: u8, y: u8, quirks: &Quirks) -> ProgramCounter {
    let source = if quirks.shift_reads_vy { y } else { x };
    let value = state.v[source as usize];
    state.v[x as usize] = value << 1;
    state.v[0xF] = value >> 7;
    ProgramCounter::Next
}

/// I = addr
fn loadi(state: &mut State, addr: u16) -> ProgramCounter {
    state.i = addr;
    ProgramCounter::Next
}

/// PC = V0 + addr
fn jumpi(state: &mut State, x: u8, addr: u16, quirks: &Quirks) -> ProgramCounter {
    let offset = if quirks.jump_with_vx { x } else { 0x0 };
    ProgramCounter::Jump(addr + u16::from(state.v[offset as usize]))
}

/// Vx = rand_byte & kk
fn rnd(state: &mut State, x: u8, kk: u8, rng: &mut impl Rng) -> ProgramCounter {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    ProgramCounter::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at mem[I..I+n] onto the display at Vx, Vy.
/// Sets VF if any pixels were erased, clears it otherwise.
/// In extended mode a size of 0 draws a 16x16 sprite from mem[I..I+32].
fn draw(state: &mut State, x: u8, y: u8, n: u8, config: &Config) -> ProgramCounter {
    let wide = n == 0 && config.extended;
    let len = if wide { 32 } else { n as usize };

    let mut sprite = [0u8; 32];
    for (offset, byte) in sprite[..len].iter_mut().enumerate() {
        *byte = state.memory.read(state.i.wrapping_add(offset as u16));
    }

    let (px, py) = (state.v[x as usize] as usize, state.v[y as usize] as usize);
    let wrap = config.quirks.wrap_sprites;
    let collision = if wide {
        state.display.draw_wide(px, py, &sprite[..len], wrap)
    } else {
        state.display.draw(px, py, &sprite[..len], wrap)
    };

    state.v[0xF] = collision as u8;
    state.draw_flag = true;
    ProgramCounter::Next
}

/// Vx = DT
fn moved(state: &mut State, x: u8) -> ProgramCounter {
    state.v[x as usize] = state.timers.delay;
    ProgramCounter::Next
}

/// DT = Vx
fn loads(state: &mut State, x: u8) -> ProgramCounter {
    state.timers.delay = state.v[x as usize];
    ProgramCounter::Next
}

/// ST = Vx
fn ld(state: &mut State, x: u8) -> ProgramCounter {
    state.timers.sound = state.v[x as usize];
    ProgramCounter::Next
}

/// I += Vx; VF = I > 0xFFF
fn addi(state: &mut State, x: u8) -> ProgramCounter {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    state.v[0xF] = (state.i > 0xFFF) as u8;
    ProgramCounter::Next
}

/// I = Vx * 5
/// Set I to the memory address of the small sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
fn ldspr(state: &mut State, x: u8) -> ProgramCounter {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = SPRITE_SHEET_START + digit * SPRITE_SIZE;
    ProgramCounter::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(state: &mut State, x: u8) -> ProgramCounter {
    let value = state.v[x as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.memory.write(state.i.wrapping_add(offset as u16), *digit);
    }
    ProgramCounter::Next
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8, quirks: &Quirks) -> ProgramCounter {
    for k in 0..=x {
        state
            .memory
            .write(state.i.wrapping_add(u16::from(k)), state.v[k as usize]);
    }
    if quirks.memory_increments_index {
        state.i = state.i.wrapping_add(u16::from(x) + 1);
    }
    ProgramCounter::Next
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8, quirks: &Quirks) -> ProgramCounter {
    for k in 0..=x {
        state.v[k as usize] = state.memory.read(state.i.wrapping_add(u16::from(k)));
    }
    if quirks.memory_increments_index {
        state.i = state.i.wrapping_add(u16::from(x) + 1);
    }
    ProgramCounter::Next
}

/// scroll down n rows
fn scd(state: &mut State, n: u8) -> ProgramCounter {
    state.display.scroll_down(n as usize);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// scroll right 4 columns
fn scr(state: &mut State) -> ProgramCounter {
    state.display.scroll_right(4);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// scroll left 4 columns
fn scl(state: &mut State) -> ProgramCounter {
    state.display.scroll_left(4);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// switch between 64x32 and 128x64
fn res(state: &mut State, hires: bool) -> ProgramCounter {
    debug!("switching to {} resolution", if hires { "high" } else { "low" });
    state.display.set_hires(hires);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// I = Vx * 10 + 0xA0
/// Set I to the memory address of the large sprite for the low nibble of Vx
fn ldhspr(state: &mut State, x: u8) -> ProgramCounter {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = LARGE_SPRITE_SHEET_START + digit * LARGE_SPRITE_SIZE;
    ProgramCounter::Next
}

/// HP[0..=x] = V0..=Vx
fn savef(state: &mut State, x: u8) -> ProgramCounter {
    let last = (x as usize).min(HP_FLAG_COUNT - 1);
    state.hp_flags[..=last].copy_from_slice(&state.v[..=last]);
    ProgramCounter::Next
}

/// V0..=Vx = HP[0..=x]
fn loadf(state: &mut State, x: u8) -> ProgramCounter {
    let last = (x as usize).min(HP_FLAG_COUNT - 1);
    state.v[..=last].copy_from_slice(&state.hp_flags[..=last]);
    ProgramCounter::Next
}
