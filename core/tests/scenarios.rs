use vm8::constants::SPRITE_SHEET;
use vm8::{Chip8, Config, Error, Status};

fn chip8_with(rom: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(Config::default(), 0);
    chip8.load_rom(rom).unwrap();
    chip8
}

fn lit_pixels(chip8: &Chip8) -> Vec<(usize, usize)> {
    let mut lit = Vec::new();
    for (y, row) in chip8.display().rows().enumerate() {
        for (x, pixel) in row.iter().enumerate() {
            if *pixel {
                lit.push((x, y));
            }
        }
    }
    lit
}

#[test]
fn clear_then_jump_to_self() {
    let mut chip8 = chip8_with(&[0x00, 0xE0, 0x12, 0x00]);
    chip8.step().unwrap();
    assert!(lit_pixels(&chip8).is_empty());
    assert_eq!(chip8.state().pc, 0x202);
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x200);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x200);
}

#[test]
fn jump_to_self_stays_put() {
    let mut chip8 = chip8_with(&[0x12, 0x00]);
    for _ in 0..3 {
        chip8.step().unwrap();
        assert_eq!(chip8.state().pc, 0x200);
    }
}

#[test]
fn load_then_add_immediate() {
    let mut chip8 = chip8_with(&[0x6A, 0x0A, 0x7A, 0x05]);
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0xA], 0x0A);
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0xA], 0x0F);
    assert_eq!(chip8.state().v[0xF], 0x00);
}

#[test]
fn draws_font_glyph_zero_at_origin() {
    let mut chip8 = chip8_with(&[0xA0, 0x50, 0xD0, 0x05]);
    chip8.step().unwrap();
    chip8.step().unwrap();

    let mut expected = Vec::new();
    for (y, row) in SPRITE_SHEET[0..5].iter().enumerate() {
        for x in 0..8 {
            if row & (0x80 >> x) != 0 {
                expected.push((x, y));
            }
        }
    }
    assert_eq!(lit_pixels(&chip8), expected);
    assert_eq!(chip8.state().v[0xF], 0x0);
}

#[test]
fn glyph_drawn_past_the_right_edge_is_discarded() {
    // V0 = 70, I = glyph 0, draw at (V0, V1)
    let mut chip8 = chip8_with(&[0x60, 0x46, 0xA0, 0x00, 0xD0, 0x15]);
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(lit_pixels(&chip8), Vec::new());
    assert_eq!(chip8.state().v[0xF], 0x0);
}

#[test]
fn nested_calls_return_in_reverse_order() {
    // 0x200 CALL 0x300
    // 0x202 HALT
    // 0x300 CALL 0x400
    // 0x302 RET
    // 0x400 RET
    let mut rom = vec![0u8; 0x202];
    rom[0x000..0x004].copy_from_slice(&[0x23, 0x00, 0x00, 0xFD]);
    rom[0x100..0x104].copy_from_slice(&[0x24, 0x00, 0x00, 0xEE]);
    rom[0x200..0x202].copy_from_slice(&[0x00, 0xEE]);
    let mut chip8 = chip8_with(&rom);

    let mut trace = Vec::new();
    for _ in 0..4 {
        chip8.step().unwrap();
        trace.push(chip8.state().pc);
    }
    assert_eq!(trace, vec![0x300, 0x400, 0x302, 0x202]);
    assert_eq!(chip8.state().sp, 0);
    assert_eq!(chip8.step(), Ok(Status::Halted));
}

#[test]
fn extra_return_underflows() {
    // CALL 0x204; RET (never reached); RET; RET
    let mut chip8 = chip8_with(&[0x22, 0x04, 0x00, 0xEE, 0x00, 0xEE]);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(
        chip8.step(),
        Err(Error::StackUnderflow { address: 0x202 })
    );
}

#[test]
fn seventeenth_call_overflows() {
    // call self forever
    let mut chip8 = chip8_with(&[0x22, 0x00]);
    for _ in 0..16 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().sp, 16);
    assert_eq!(chip8.step(), Err(Error::StackOverflow { address: 0x200 }));
}

#[test]
fn oversized_rom_is_rejected() {
    let mut chip8 = Chip8::new();
    assert_eq!(
        chip8.load_rom(&vec![0; 0xE01]),
        Err(Error::RomTooLarge { size: 0xE01 })
    );
}

#[test]
fn wait_for_key_resumes_on_press() {
    // V3 = key; halt
    let mut chip8 = chip8_with(&[0xF3, 0x0A, 0x00, 0xFD]);
    for _ in 0..10 {
        assert_eq!(chip8.step(), Ok(Status::WaitingForKey));
    }
    chip8.key_press(0xB);
    assert_eq!(chip8.step(), Ok(Status::Running));
    assert_eq!(chip8.state().v[0x3], 0xB);
    assert_eq!(chip8.step(), Ok(Status::Halted));
}

#[test]
fn sound_timer_counts_down_to_silence() {
    // V0 = 2; ST = V0; loop
    let mut chip8 = chip8_with(&[0x60, 0x02, 0xF0, 0x18, 0x12, 0x04]);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert!(chip8.sound_active());
    chip8.tick_timers();
    chip8.tick_timers();
    assert!(!chip8.sound_active());
    chip8.tick_timers();
    assert_eq!(chip8.sound_timer(), 0);
}

#[test]
fn extended_mode_switches_resolution() {
    let config = Config {
        extended: true,
        ..Config::default()
    };
    let mut chip8 = Chip8::with_seed(config, 0);
    chip8.load_rom(&[0x00, 0xFF, 0x00, 0xFE]).unwrap();
    chip8.step().unwrap();
    assert_eq!((chip8.display().width(), chip8.display().height()), (128, 64));
    chip8.step().unwrap();
    assert_eq!((chip8.display().width(), chip8.display().height()), (64, 32));
}

#[test]
fn extended_opcode_without_extended_mode_faults() {
    let mut chip8 = chip8_with(&[0x00, 0xFF]);
    assert_eq!(
        chip8.step(),
        Err(Error::UnsupportedOpcode {
            opcode: 0x00FF,
            address: 0x200
        })
    );
}
