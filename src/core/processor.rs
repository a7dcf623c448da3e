use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts;
use crate::core::error::Chip8Error;
use crate::core::instruction::Instruction;
use crate::core::quirks::Quirks;
use crate::core::ram::{DisplayBuffer, KeyboardBuffer, Ram};
use crate::core::rom::Rom;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    RedrawScreen,
    Continue,
    /// Blocked on `FX0A`; the same instruction runs again next cycle.
    Waiting,
}

/// How the program counter moves after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Advance,
    Skip,
    /// The handler already set the program counter.
    Redirect,
    Wait,
}

#[derive(Debug, Clone)]
pub struct Processor {
    pub stack: [u16; consts::STACK_SIZE],
    pub registers: [u8; consts::REG_COUNT],
    pub idx_register: u16,
    pub pc: u16,
    /// Index of the current top of the stack; slot 0 is never written.
    pub stack_pointer: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub ram: Ram,
    pub display_buffer: DisplayBuffer,
    pub keyboard_buffer: KeyboardBuffer,
    pub draw_flag: bool,
    pub quirks: Quirks,
    rng: StdRng,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::with_rng(Quirks::default(), StdRng::from_entropy())
    }
}

impl Processor {
    pub fn new(quirks: Quirks) -> Self {
        Processor::with_rng(quirks, StdRng::from_entropy())
    }

    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Processor::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        Processor {
            stack: [0; consts::STACK_SIZE],
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            ram: Ram::default(),
            display_buffer: DisplayBuffer::default(),
            keyboard_buffer: KeyboardBuffer::default(),
            draw_flag: false,
            quirks,
            rng,
        }
    }

    pub fn init_ram(&mut self, rom: &Rom) -> Result<(), Chip8Error> {
        if rom.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::RomTooBig { size: rom.len() });
        }
        self.ram.buffer[0..consts::FONT_SET_SIZE].copy_from_slice(&consts::FONT_SET);
        self.ram.buffer[consts::PROG_OFFSET..consts::PROG_OFFSET + rom.len()]
            .copy_from_slice(&rom.buffer);
        info!("Loaded {} byte program at {:#05X}", rom.len(), consts::PROG_OFFSET);
        Ok(())
    }

    pub fn fetch(&self) -> u16 {
        utils::join_bytes(self.ram.read(self.pc), self.ram.read(self.pc.wrapping_add(1)))
    }

    pub fn cycle(&mut self) -> Result<CycleStatus, Chip8Error> {
        let word = self.fetch();
        let instruction = Instruction::decode(word)?;
        trace!("{:#05X}: {:04X} {}", self.pc, word, instruction);

        match self.execute(instruction)? {
            Flow::Advance => self.advance(1),
            Flow::Skip => self.advance(2),
            Flow::Redirect => {}
            Flow::Wait => return Ok(CycleStatus::Waiting),
        }

        match instruction {
            Instruction::ClearScreen | Instruction::Draw { .. } => Ok(CycleStatus::RedrawScreen),
            _ => Ok(CycleStatus::Continue),
        }
    }

    pub fn step_over(&mut self) {
        self.advance(1);
    }

    fn advance(&mut self, instructions: u16) {
        self.pc = self
            .pc
            .wrapping_add(instructions * consts::OP_CODE_BYTES as u16)
            & consts::ADDRESS_MASK;
    }

    // Operands are validated before anything is written.
    pub fn execute(&mut self, instruction: Instruction) -> Result<Flow, Chip8Error> {
        match instruction {
            // Display and subroutines
            Instruction::ClearScreen => {
                self.display_buffer.clear();
                self.draw_flag = true;
            }
            Instruction::Return => {
                if self.stack_pointer == 0 || self.stack_pointer >= consts::STACK_SIZE {
                    return Err(Chip8Error::InvalidStackPointer {
                        stack_pointer: self.stack_pointer,
                    });
                }
                self.pc = self.stack[self.stack_pointer];
                self.stack_pointer -= 1;
                debug!("Return to {:#05X}, depth {}", self.pc, self.stack_pointer);
                // Resume after the call instruction that was saved.
                return Ok(Flow::Advance);
            }
            Instruction::Jump { nnn } => {
                self.pc = nnn & consts::ADDRESS_MASK;
                return Ok(Flow::Redirect);
            }
            Instruction::Call { nnn } => {
                if self.stack_pointer + 1 >= consts::STACK_SIZE {
                    return Err(Chip8Error::InvalidStackPointer {
                        stack_pointer: self.stack_pointer,
                    });
                }
                self.stack_pointer += 1;
                self.stack[self.stack_pointer] = self.pc;
                self.pc = nnn & consts::ADDRESS_MASK;
                debug!("Call {:#05X}, depth {}", nnn, self.stack_pointer);
                return Ok(Flow::Redirect);
            }

            // Conditional skips
            Instruction::SkipIfEqual { x, kk } => {
                return Ok(skip_if(self.register(x)? == kk));
            }
            Instruction::SkipIfNotEqual { x, kk } => {
                return Ok(skip_if(self.register(x)? != kk));
            }
            Instruction::SkipIfRegistersEqual { x, y } => {
                return Ok(skip_if(self.register(x)? == self.register(y)?));
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                return Ok(skip_if(self.register(x)? != self.register(y)?));
            }
            Instruction::SkipIfKeyPressed { x } => {
                let key = self.register(x)?;
                return Ok(skip_if(self.keyboard_buffer.is_pressed(key)?));
            }
            Instruction::SkipIfKeyNotPressed { x } => {
                let key = self.register(x)?;
                return Ok(skip_if(!self.keyboard_buffer.is_pressed(key)?));
            }

            // Set register
            Instruction::LoadImmediate { x, kk } => self.set_register(x, kk)?,
            Instruction::Move { x, y } => {
                let vy = self.register(y)?;
                self.set_register(x, vy)?;
            }
            Instruction::LoadIndex { nnn } => self.idx_register = nnn,

            // Add/subtract instructions
            Instruction::AddImmediate { x, kk } => {
                let vx = self.register(x)?;
                self.set_register(x, vx.wrapping_add(kk))?;
            }
            Instruction::AddRegisters { x, y } => {
                let (vx, vy) = (self.register(x)?, self.register(y)?);
                let (sum, carry) = vx.overflowing_add(vy);
                self.set_register(x, sum)?;
                self.set_flag(carry);
            }
            Instruction::Subtract { x, y } => {
                let (vx, vy) = (self.register(x)?, self.register(y)?);
                self.set_register(x, vx.wrapping_sub(vy))?;
                self.set_flag(vx >= vy);
            }
            Instruction::SubtractReversed { x, y } => {
                let (vx, vy) = (self.register(x)?, self.register(y)?);
                self.set_register(x, vy.wrapping_sub(vx))?;
                self.set_flag(vy >= vx);
            }

            // Logical instructions
            Instruction::Or { x, y } => {
                let value = self.register(x)? | self.register(y)?;
                self.set_register(x, value)?;
            }
            Instruction::And { x, y } => {
                let value = self.register(x)? & self.register(y)?;
                self.set_register(x, value)?;
            }
            Instruction::Xor { x, y } => {
                let value = self.register(x)? ^ self.register(y)?;
                self.set_register(x, value)?;
            }

            // Shifting instructions
            Instruction::ShiftRight { x, y } => {
                let source = self.shift_source(x, y)?;
                self.set_register(x, source >> 1)?;
                self.set_flag(source & 0b0000_0001 == 1);
            }
            Instruction::ShiftLeft { x, y } => {
                let source = self.shift_source(x, y)?;
                self.set_register(x, source << 1)?;
                self.set_flag(source & 0b1000_0000 != 0);
            }

            Instruction::JumpOffset { nnn } => {
                self.pc = nnn.wrapping_add(self.registers[0] as u16) & consts::ADDRESS_MASK;
                return Ok(Flow::Redirect);
            }

            // Generate randomness
            Instruction::Random { x, kk } => {
                self.register(x)?;
                let value: u8 = self.rng.gen();
                self.set_register(x, value & kk)?;
            }

            Instruction::Draw { x, y, n } => {
                let (vx, vy) = (self.register(x)?, self.register(y)?);
                let rows: Vec<u8> = (0..n as u16)
                    .map(|row| self.ram.read(self.idx_register.wrapping_add(row)))
                    .collect();
                let collision = self.display_buffer.draw_sprite(vx, vy, &rows);
                self.set_flag(collision);
                self.draw_flag = true;
            }

            // Timers
            Instruction::LoadDelayTimer { x } => self.set_register(x, self.delay_timer)?,
            Instruction::SetDelayTimer { x } => self.delay_timer = self.register(x)?,
            Instruction::SetSoundTimer { x } => self.sound_timer = self.register(x)?,

            Instruction::WaitForKey { x } => {
                self.register(x)?;
                match self.keyboard_buffer.first_pressed() {
                    Some(key) => {
                        debug!("Key {:X} ends wait", key);
                        self.set_register(x, key)?;
                    }
                    None => return Ok(Flow::Wait),
                }
            }

            // Index register and memory
            Instruction::AddToIndex { x } => {
                let vx = self.register(x)?;
                self.idx_register = self.idx_register.wrapping_add(vx as u16);
            }
            Instruction::LoadFontGlyph { x } => {
                let digit = self.register(x)? & 0x0F;
                self.idx_register = digit as u16 * consts::FONT_GLYPH_BYTES as u16;
            }
            Instruction::StoreBcd { x } => {
                let value = self.register(x)?;
                let digits = [value / 100, (value % 100) / 10, value % 10];
                for (offset, digit) in digits.into_iter().enumerate() {
                    self.ram
                        .write(self.idx_register.wrapping_add(offset as u16), digit);
                }
            }
            Instruction::StoreRegisters { x } => {
                self.register(x)?;
                for i in 0..=x {
                    self.ram.write(
                        self.idx_register.wrapping_add(i as u16),
                        self.registers[i as usize],
                    );
                }
                self.bump_index(x);
            }
            Instruction::LoadRegisters { x } => {
                self.register(x)?;
                for i in 0..=x {
                    self.registers[i as usize] =
                        self.ram.read(self.idx_register.wrapping_add(i as u16));
                }
                self.bump_index(x);
            }
        }
        Ok(Flow::Advance)
    }

    pub fn register(&self, x: u8) -> Result<u8, Chip8Error> {
        self.registers
            .get(x as usize)
            .copied()
            .ok_or(Chip8Error::InvalidRegister { register: x })
    }

    pub fn set_register(&mut self, x: u8, value: u8) -> Result<(), Chip8Error> {
        let cell = self
            .registers
            .get_mut(x as usize)
            .ok_or(Chip8Error::InvalidRegister { register: x })?;
        *cell = value;
        Ok(())
    }

    fn set_flag(&mut self, flag: bool) {
        self.registers[consts::FLAG_REGISTER] = flag as u8;
    }

    fn shift_source(&self, x: u8, y: u8) -> Result<u8, Chip8Error> {
        let vx = self.register(x)?;
        let vy = self.register(y)?;
        Ok(if self.quirks.shift_uses_vy { vy } else { vx })
    }

    fn bump_index(&mut self, x: u8) {
        if self.quirks.load_store_increments_index {
            self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
        }
    }

    pub fn tick_timers(&mut self, ticks: u32) {
        let ticks = ticks.min(u8::MAX as u32) as u8;
        self.delay_timer = self.delay_timer.saturating_sub(ticks);
        self.sound_timer = self.sound_timer.saturating_sub(ticks);
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::take(&mut self.draw_flag)
    }
}

fn skip_if(condition: bool) -> Flow {
    if condition {
        Flow::Skip
    } else {
        Flow::Advance
    }
}

pub fn load(rom: &Rom, quirks: Quirks, seed: Option<u64>) -> Result<Processor, Chip8Error> {
    let mut processor = match seed {
        Some(seed) => Processor::with_seed(quirks, seed),
        None => Processor::new(quirks),
    };
    processor.init_ram(rom)?;
    Ok(processor)
}

pub fn cycle(processor: Option<&mut Processor>) -> Result<CycleStatus, Chip8Error> {
    processor.ok_or(Chip8Error::InvalidState)?.cycle()
}

/// Fails with [`Chip8Error::InvalidState`] when there is no machine.
pub fn execute(
    processor: Option<&mut Processor>,
    instruction: Instruction,
) -> Result<Flow, Chip8Error> {
    processor.ok_or(Chip8Error::InvalidState)?.execute(instruction)
}
