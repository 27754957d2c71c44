use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

use crate::keymap::keymap;
use display::Display;
use vm8::{Chip8, Config, Status};

/// How often input is polled and the window redrawn
const FRAME_RATE: u32 = 60;

/// What a window event means to the keypad
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Input {
    Quit,
    Press(u8),
    Release(u8),
    ReleaseAll,
    Ignore,
}

/// Keys latch on their first key-down and stay pressed until key-up. Auto-repeat
/// key-downs and keys outside the keypad are ignored.
fn input(event: &Event) -> Input {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            scancode: Some(Scancode::Escape),
            ..
        } => Input::Quit,
        Event::KeyDown {
            scancode: Some(key),
            repeat: false,
            ..
        } => keymap(*key).map_or(Input::Ignore, Input::Press),
        Event::KeyUp {
            scancode: Some(key),
            ..
        } => keymap(*key).map_or(Input::Ignore, Input::Release),
        // Release events never arrive for keys let go while unfocused
        Event::Window {
            win_event: WindowEvent::FocusLost,
            ..
        } => Input::ReleaseAll,
        _ => Input::Ignore,
    }
}

/// Applies `input` to the keypad; false once the user asked to quit
fn latch(chip8: &mut Chip8, input: Input) -> bool {
    match input {
        Input::Quit => return false,
        Input::Press(key) => chip8.key_press(key),
        Input::Release(key) => chip8.key_release(key),
        Input::ReleaseAll => chip8.release_keys(),
        Input::Ignore => {}
    }
    true
}

/// Runs a ROM until the window is closed, Escape is pressed or the program halts.
///
/// The interpreter is fed the wall-clock time that passed each frame and runs
/// however many instructions and timer ticks that time is worth.
pub fn run(rom: &Path, config: Config, scale: u32) -> Result<()> {
    let bytes = fs::read(rom).with_context(|| format!("unable to read {}", rom.display()))?;
    let mut chip8 = Chip8::with_config(config);
    chip8
        .load_rom(&bytes)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!("loaded {} ({} bytes)", rom.display(), bytes.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut last_frame = Instant::now();
    let mut sounding = false;

    'event: loop {
        // Handle input; the quit signal is honored even while waiting for a key
        for event in events.poll_iter() {
            if !latch(&mut chip8, input(&event)) {
                break 'event;
            }
        }

        // Update state
        let now = Instant::now();
        let status = chip8.advance(now - last_frame).context("program faulted")?;
        last_frame = now;

        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(|e| anyhow!(e))?;
        }

        if chip8.sound_active() != sounding {
            sounding = !sounding;
            debug!("tone {}", if sounding { "on" } else { "off" });
        }

        if status == Status::Halted {
            info!("program halted");
            break;
        }

        // Handle timing
        let elapsed = now.elapsed();
        if frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
