use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use vm8::{Config, Quirks, CLOCK_SPEED};

mod keymap;
mod run;

const MAX_IPS: i64 = 1_000_000;

/// Runs a Chip-8 ROM in an SDL2 window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..=MAX_IPS))]
    ips: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Enable the extended instruction set (scrolling, 128x64 display, large font)
    #[arg(long)]
    extended: bool,

    /// 8XY6/8XYE shift Vy into Vx
    #[arg(long)]
    quirk_shift_vy: bool,

    /// FX55/FX65 advance I past the registers they transfer
    #[arg(long)]
    quirk_increment_index: bool,

    /// BNNN jumps to NNN + Vx instead of NNN + V0
    #[arg(long)]
    quirk_jump_vx: bool,

    /// Sprites wrap around the screen edges instead of being clipped
    #[arg(long)]
    quirk_wrap: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            extended: self.extended,
            instructions_per_second: self.ips,
            quirks: Quirks {
                shift_reads_vy: self.quirk_shift_vy,
                memory_increments_index: self.quirk_increment_index,
                jump_with_vx: self.quirk_jump_vx,
                wrap_sprites: self.quirk_wrap,
            },
            ..Config::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("vm8=info,chip8=info")).init();

    let args = Args::parse();
    run::run(&args.rom, args.config(), args.scale)
}
