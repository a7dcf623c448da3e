use std::path::PathBuf;

use clap::Parser;
use log::info;

use chip8::consts;
use chip8::external::input::KeyboardDriver;
use chip8::external::output::DisplayDriver;
use chip8::{Emulator, EmulatorConfig, Quirks, Rom};

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Runs a CHIP-8 program in an SDL2 window.")]
struct Args {
    /// Program image to load at 0x200.
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Window pixels per display cell.
    #[arg(long, default_value_t = consts::SCALE_FACTOR)]
    scale: u32,

    /// Instructions per second; 0 runs as fast as possible.
    #[arg(long, default_value_t = consts::DEFAULT_CLOCK_HZ)]
    clock_hz: u32,

    /// Seed for the random number instruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Shift instructions read Vy instead of Vx.
    #[arg(long, default_value_t = false)]
    shift_vy: bool,

    /// Register load/store instructions advance the index register.
    #[arg(long, default_value_t = false)]
    load_store_increment: bool,

    /// Skip over malformed instructions instead of stopping.
    #[arg(long, default_value_t = false)]
    lenient: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let rom = Rom::new(&args.rom)?;
    info!("Read {} ({} bytes)", args.rom.display(), rom.len());

    let context = sdl2::init()?;
    let display = DisplayDriver::new(&context, args.scale)?;
    let keyboard = KeyboardDriver::new(&context)?;

    let config = EmulatorConfig {
        clock_hz: args.clock_hz,
        lenient: args.lenient,
    };
    let quirks = Quirks {
        shift_uses_vy: args.shift_vy,
        load_store_increments_index: args.load_store_increment,
    };

    let mut emulator = Emulator::new(display, keyboard, config);
    emulator.load(&rom, quirks, args.seed)?;
    emulator.run()?;
    Ok(())
}
