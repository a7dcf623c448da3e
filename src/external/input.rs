use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::core::ram::KeyboardBuffer;
use crate::emulator::{InputSource, PollStatus};

pub struct KeyboardDriver {
    events: sdl2::EventPump,
}

impl KeyboardDriver {
    pub fn new(context: &sdl2::Sdl) -> Result<Self, String> {
        Ok(KeyboardDriver {
            events: context.event_pump()?,
        })
    }
}

/// Maps the left-hand 4x4 block of a QWERTY keyboard onto the hex keypad.
pub fn key_index(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

impl InputSource for KeyboardDriver {
    fn poll(&mut self, keyboard: &mut KeyboardBuffer) -> Result<PollStatus, String> {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return Ok(PollStatus::Quit),
                _ => continue,
            }
        }

        keyboard.release_all();
        let state = self.events.keyboard_state();
        let pressed: Vec<u8> = state
            .pressed_scancodes()
            .filter_map(Keycode::from_scancode)
            .filter_map(key_index)
            .collect();
        for index in pressed {
            keyboard.set(index, true).map_err(|e| e.to_string())?;
        }
        Ok(PollStatus::Continue)
    }
}
