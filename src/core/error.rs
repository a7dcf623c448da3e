//! Errors raised by the engine and by ROM ingestion.

use crate::consts;

/// Error types that can occur while loading or executing a program.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    /// An entry point was handed no machine to operate on.
    #[error("No machine state available")]
    InvalidState,

    /// A call would push past the top of the stack, or a return would pop
    /// an empty stack.
    #[error("Invalid stack pointer {stack_pointer} (capacity {})", consts::STACK_SIZE)]
    InvalidStackPointer { stack_pointer: usize },

    #[error("Invalid register V{register:X}")]
    InvalidRegister { register: u8 },

    #[error("Invalid key {key:#04X}")]
    InvalidKey { key: u8 },

    /// The instruction word does not belong to the instruction set.
    #[error("Unknown opcode: {opcode:#06X}")]
    Decode { opcode: u16 },

    #[error("ROM is too large ({size} bytes), max size is {} bytes", consts::MAX_ROM_BYTES)]
    RomTooBig { size: usize },

    #[error("Could not read ROM: {0}")]
    RomRead(#[from] std::io::Error),
}

impl Chip8Error {
    /// Errors caused by a malformed program rather than a broken machine.
    pub fn is_program_fault(&self) -> bool {
        matches!(
            self,
            Chip8Error::Decode { .. } | Chip8Error::InvalidKey { .. }
        )
    }
}
