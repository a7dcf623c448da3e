use std::fs::{self, File};
use std::io::prelude::*;
use std::path::Path;

use crate::consts;
use crate::core::error::Chip8Error;

/// A program image, guaranteed to fit in the program area of memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Rom {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Chip8Error> {
        let path = path.as_ref();
        let size = fs::metadata(path)?.len() as usize;
        if size > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::RomTooBig { size });
        }

        let mut buffer = Vec::with_capacity(size);
        File::open(path)?.read_to_end(&mut buffer)?;
        // The file may have grown between the size check and the read.
        Self::from_bytes(buffer)
    }

    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, Chip8Error> {
        if buffer.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::RomTooBig { size: buffer.len() });
        }
        Ok(Rom { buffer })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
