use proptest::prelude::*;
use vm8::constants::{SPRITE_SHEET, SPRITE_SIZE};
use vm8::{Chip8, Config};

fn run(rom: &[u8], steps: usize) -> Chip8 {
    let mut chip8 = Chip8::with_seed(Config::default(), 0);
    chip8.load_rom(rom).unwrap();
    for _ in 0..steps {
        chip8.step().unwrap();
    }
    chip8
}

fn lit(chip8: &Chip8) -> Vec<Vec<bool>> {
    chip8.display().rows().map(|row| row.to_vec()).collect()
}

proptest! {
    #[test]
    fn add_wraps_and_flags_carry(a in any::<u8>(), b in any::<u8>()) {
        // V1 = a; V2 = b; V1 += V2
        let chip8 = run(&[0x61, a, 0x62, b, 0x81, 0x24], 3);
        let v = chip8.state().v;
        prop_assert_eq!(v[0x1], a.wrapping_add(b));
        prop_assert_eq!(v[0xF], (u16::from(a) + u16::from(b) > 255) as u8);
    }

    #[test]
    fn sub_flags_from_operands_before_subtracting(a in any::<u8>(), b in any::<u8>()) {
        // V1 = a; V2 = b; V1 -= V2
        let chip8 = run(&[0x61, a, 0x62, b, 0x81, 0x25], 3);
        let v = chip8.state().v;
        prop_assert_eq!(v[0x1], a.wrapping_sub(b));
        prop_assert_eq!(v[0xF], (a >= b) as u8);
    }

    #[test]
    fn subn_flags_from_operands_before_subtracting(a in any::<u8>(), b in any::<u8>()) {
        // V1 = a; V2 = b; V1 = V2 - V1
        let chip8 = run(&[0x61, a, 0x62, b, 0x81, 0x27], 3);
        let v = chip8.state().v;
        prop_assert_eq!(v[0x1], b.wrapping_sub(a));
        prop_assert_eq!(v[0xF], (b >= a) as u8);
    }

    #[test]
    fn shifts_flag_the_bit_shifted_out(a in any::<u8>()) {
        // V1 = a; V2 = a; V1 >>= 1; V2 <<= 1
        let chip8 = run(&[0x61, a, 0x62, a, 0x81, 0x06], 3);
        prop_assert_eq!(chip8.state().v[0x1], a >> 1);
        prop_assert_eq!(chip8.state().v[0xF], a & 1);

        let chip8 = run(&[0x61, a, 0x62, a, 0x82, 0x0E], 3);
        prop_assert_eq!(chip8.state().v[0x2], a << 1);
        prop_assert_eq!(chip8.state().v[0xF], a >> 7);
    }

    #[test]
    fn drawing_twice_restores_the_screen(
        x in 0u8..80,
        y in 0u8..40,
        sprite in proptest::collection::vec(any::<u8>(), 1..16),
    ) {
        let n = sprite.len() as u8;
        // I = 0x20A (the sprite after the code); V0 = x; V1 = y; draw; draw
        let mut rom = vec![0xA2, 0x0A, 0x60, x, 0x61, y, 0xD0, 0x10 | n, 0xD0, 0x10 | n];
        rom.extend_from_slice(&sprite);

        let mut chip8 = run(&rom, 3);
        let before = lit(&chip8);
        chip8.step().unwrap();
        let drew_something = lit(&chip8) != before;
        prop_assert_eq!(chip8.state().v[0xF], 0);

        chip8.step().unwrap();
        prop_assert_eq!(lit(&chip8), before);
        prop_assert_eq!(chip8.state().v[0xF], drew_something as u8);
    }

    #[test]
    fn bcd_stores_decimal_digits(a in any::<u8>()) {
        // V1 = a; I = 0x300; bcd
        let chip8 = run(&[0x61, a, 0xA3, 0x00, 0xF1, 0x33], 3);
        let digits = &chip8.state().memory.bytes()[0x300..0x303];
        prop_assert_eq!(digits, &[a / 100, a / 10 % 10, a % 10][..]);
    }
}

#[test]
fn font_glyphs_are_where_fx29_points() {
    for digit in 0..=0xFu8 {
        // V0 = digit; I = sprite(V0)
        let chip8 = run(&[0x60, digit, 0xF0, 0x29], 2);
        let i = chip8.state().i as usize;
        let start = digit as usize * SPRITE_SIZE as usize;
        assert_eq!(i, start);
        assert_eq!(
            chip8.state().memory.bytes()[i..i + 5],
            SPRITE_SHEET[start..start + 5]
        );
    }
}
