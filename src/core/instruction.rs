//! Decoding of raw instruction words.
//!
//! A word is decoded once into an [`Instruction`] and then executed by an
//! exhaustive match, so every family of the instruction set is handled by
//! construction. Words outside the instruction set are rejected here with
//! [`Chip8Error::Decode`].

use std::fmt;

use crate::core::error::Chip8Error;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XKK`
    SkipIfEqual { x: u8, kk: u8 },
    /// `4XKK`
    SkipIfNotEqual { x: u8, kk: u8 },
    /// `5XY0`
    SkipIfRegistersEqual { x: u8, y: u8 },
    /// `6XKK`
    LoadImmediate { x: u8, kk: u8 },
    /// `7XKK`
    AddImmediate { x: u8, kk: u8 },
    /// `8XY0`
    Move { x: u8, y: u8 },
    /// `8XY1`
    Or { x: u8, y: u8 },
    /// `8XY2`
    And { x: u8, y: u8 },
    /// `8XY3`
    Xor { x: u8, y: u8 },
    /// `8XY4`
    AddRegisters { x: u8, y: u8 },
    /// `8XY5`
    Subtract { x: u8, y: u8 },
    /// `8XY6`
    ShiftRight { x: u8, y: u8 },
    /// `8XY7`
    SubtractReversed { x: u8, y: u8 },
    /// `8XYE`
    ShiftLeft { x: u8, y: u8 },
    /// `9XY0`
    SkipIfRegistersNotEqual { x: u8, y: u8 },
    /// `ANNN`
    LoadIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { nnn: u16 },
    /// `CXKK`
    Random { x: u8, kk: u8 },
    /// `DXYN`
    Draw { x: u8, y: u8, n: u8 },
    /// `EX9E`
    SkipIfKeyPressed { x: u8 },
    /// `EXA1`
    SkipIfKeyNotPressed { x: u8 },
    /// `FX07`
    LoadDelayTimer { x: u8 },
    /// `FX0A`
    WaitForKey { x: u8 },
    /// `FX15`
    SetDelayTimer { x: u8 },
    /// `FX18`
    SetSoundTimer { x: u8 },
    /// `FX1E`
    AddToIndex { x: u8 },
    /// `FX29`
    LoadFontGlyph { x: u8 },
    /// `FX33`
    StoreBcd { x: u8 },
    /// `FX55`
    StoreRegisters { x: u8 },
    /// `FX65`
    LoadRegisters { x: u8 },
}

impl Instruction {
    pub fn decode(word: u16) -> Result<Self, Chip8Error> {
        let (family, x, y, n) = utils::nibble_split(word);
        let nnn = word & 0x0FFF;
        let kk = (word & 0x00FF) as u8;

        let instruction = match family {
            0x0 => match word {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                // 0NNN machine routines are not supported
                _ => return Err(Chip8Error::Decode { opcode: word }),
            },
            0x1 => Instruction::Jump { nnn },
            0x2 => Instruction::Call { nnn },
            0x3 => Instruction::SkipIfEqual { x, kk },
            0x4 => Instruction::SkipIfNotEqual { x, kk },
            0x5 if n == 0 => Instruction::SkipIfRegistersEqual { x, y },
            0x6 => Instruction::LoadImmediate { x, kk },
            0x7 => Instruction::AddImmediate { x, kk },
            0x8 => match n {
                0x0 => Instruction::Move { x, y },
                0x1 => Instruction::Or { x, y },
                0x2 => Instruction::And { x, y },
                0x3 => Instruction::Xor { x, y },
                0x4 => Instruction::AddRegisters { x, y },
                0x5 => Instruction::Subtract { x, y },
                0x6 => Instruction::ShiftRight { x, y },
                0x7 => Instruction::SubtractReversed { x, y },
                0xE => Instruction::ShiftLeft { x, y },
                _ => return Err(Chip8Error::Decode { opcode: word }),
            },
            0x9 if n == 0 => Instruction::SkipIfRegistersNotEqual { x, y },
            0xA => Instruction::LoadIndex { nnn },
            0xB => Instruction::JumpOffset { nnn },
            0xC => Instruction::Random { x, kk },
            0xD => Instruction::Draw { x, y, n },
            0xE => match kk {
                0x9E => Instruction::SkipIfKeyPressed { x },
                0xA1 => Instruction::SkipIfKeyNotPressed { x },
                _ => return Err(Chip8Error::Decode { opcode: word }),
            },
            0xF => match kk {
                0x07 => Instruction::LoadDelayTimer { x },
                0x0A => Instruction::WaitForKey { x },
                0x15 => Instruction::SetDelayTimer { x },
                0x18 => Instruction::SetSoundTimer { x },
                0x1E => Instruction::AddToIndex { x },
                0x29 => Instruction::LoadFontGlyph { x },
                0x33 => Instruction::StoreBcd { x },
                0x55 => Instruction::StoreRegisters { x },
                0x65 => Instruction::LoadRegisters { x },
                _ => return Err(Chip8Error::Decode { opcode: word }),
            },
            _ => return Err(Chip8Error::Decode { opcode: word }),
        };
        Ok(instruction)
    }

    /// The most significant nibble of the encoded word.
    pub fn family(&self) -> u8 {
        match self {
            Instruction::ClearScreen | Instruction::Return => 0x0,
            Instruction::Jump { .. } => 0x1,
            Instruction::Call { .. } => 0x2,
            Instruction::SkipIfEqual { .. } => 0x3,
            Instruction::SkipIfNotEqual { .. } => 0x4,
            Instruction::SkipIfRegistersEqual { .. } => 0x5,
            Instruction::LoadImmediate { .. } => 0x6,
            Instruction::AddImmediate { .. } => 0x7,
            Instruction::Move { .. }
            | Instruction::Or { .. }
            | Instruction::And { .. }
            | Instruction::Xor { .. }
            | Instruction::AddRegisters { .. }
            | Instruction::Subtract { .. }
            | Instruction::ShiftRight { .. }
            | Instruction::SubtractReversed { .. }
            | Instruction::ShiftLeft { .. } => 0x8,
            Instruction::SkipIfRegistersNotEqual { .. } => 0x9,
            Instruction::LoadIndex { .. } => 0xA,
            Instruction::JumpOffset { .. } => 0xB,
            Instruction::Random { .. } => 0xC,
            Instruction::Draw { .. } => 0xD,
            Instruction::SkipIfKeyPressed { .. } | Instruction::SkipIfKeyNotPressed { .. } => 0xE,
            Instruction::LoadDelayTimer { .. }
            | Instruction::WaitForKey { .. }
            | Instruction::SetDelayTimer { .. }
            | Instruction::SetSoundTimer { .. }
            | Instruction::AddToIndex { .. }
            | Instruction::LoadFontGlyph { .. }
            | Instruction::StoreBcd { .. }
            | Instruction::StoreRegisters { .. }
            | Instruction::LoadRegisters { .. } => 0xF,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::ClearScreen => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipIfEqual { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipIfNotEqual { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadImmediate { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddImmediate { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddRegisters { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Subtract { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Instruction::SubtractReversed { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipIfKeyPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipIfKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddToIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFontGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
