//! A CHIP-8 virtual machine: 4KB of memory, sixteen 8-bit registers, a
//! 64x32 monochrome display, a hex keypad and two 60Hz countdown timers.
//!
//! [`core`] holds the machine state and the instruction engine,
//! [`emulator`] the loop that drives it, and `external` the SDL2 window and
//! keyboard (behind the `sdl` feature).

pub mod consts;
pub mod core;
pub mod emulator;
#[cfg(feature = "sdl")]
pub mod external;
pub mod utils;

pub use crate::core::{Chip8Error, CycleStatus, Instruction, Processor, Quirks, Rom};
pub use crate::emulator::{Emulator, EmulatorConfig, EmulatorError};
