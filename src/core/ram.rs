use crate::consts;
use crate::core::error::Chip8Error;

#[derive(Debug, Clone)]
pub struct Ram {
    pub buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        Ram {
            buffer: [0; consts::RAM_BYTES],
        }
    }
}

impl Ram {
    // Addresses wrap at 12 bits
    pub fn read(&self, address: u16) -> u8 {
        self.buffer[(address & consts::ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.buffer[(address & consts::ADDRESS_MASK) as usize] = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    pub buffer: [[u8; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [[0; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
        }
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [0; consts::CHIP8_WIDTH]);
    }

    /// XORs a sprite onto the buffer, wrapping at the edges. Returns true on collision.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, &bits) in rows.iter().enumerate() {
            let py = (y as usize + row) % consts::CHIP8_HEIGHT;
            for column in 0..8 {
                if bits & (0x80 >> column) == 0 {
                    continue;
                }
                let px = (x as usize + column) % consts::CHIP8_WIDTH;
                let cell = &mut self.buffer[py][px];
                if *cell == 1 {
                    collision = true;
                }
                *cell ^= 1;
            }
        }
        collision
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.iter().flatten().all(|&cell| cell == 0)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeyboardBuffer {
    pub buffer: [u8; consts::KEYBOARD_SIZE],
}

impl KeyboardBuffer {
    pub fn set(&mut self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        let cell = self
            .buffer
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey { key })?;
        *cell = pressed as u8;
        Ok(())
    }

    pub fn is_pressed(&self, key: u8) -> Result<bool, Chip8Error> {
        self.buffer
            .get(key as usize)
            .map(|&state| state == 1)
            .ok_or(Chip8Error::InvalidKey { key })
    }

    pub fn first_pressed(&self) -> Option<u8> {
        self.buffer
            .iter()
            .position(|&state| state == 1)
            .map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.buffer = [0; consts::KEYBOARD_SIZE];
    }
}
