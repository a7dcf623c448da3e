pub mod error;
pub mod instruction;
pub mod processor;
pub mod quirks;
pub mod ram;
pub mod rom;
pub mod timer;

pub use error::Chip8Error;
pub use instruction::Instruction;
pub use processor::{CycleStatus, Flow, Processor};
pub use quirks::Quirks;
pub use rom::Rom;
