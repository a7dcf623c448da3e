use log::warn;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::consts;
use crate::core::ram::DisplayBuffer;
use crate::emulator::Renderer;

const LIT: Color = Color {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
};
const UNLIT: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};
const BEEP_HZ: f32 = 440.0;

pub struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

pub struct DisplayDriver {
    pub screen: Canvas<Window>,
    scale: u32,
    beeper: Option<AudioDevice<SquareWave>>,
    beeping: bool,
}

impl DisplayDriver {
    pub fn new(context: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = context.video()?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                consts::CHIP8_WIDTH as u32 * scale,
                consts::CHIP8_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        canvas.set_draw_color(UNLIT);
        canvas.clear();
        canvas.present();

        // A missing audio device is not worth refusing to run over.
        let beeper = match open_beeper(context) {
            Ok(device) => Some(device),
            Err(e) => {
                warn!("Sound disabled: {}", e);
                None
            }
        };

        Ok(DisplayDriver {
            screen: canvas,
            scale,
            beeper,
            beeping: false,
        })
    }
}

fn open_beeper(context: &sdl2::Sdl) -> Result<AudioDevice<SquareWave>, String> {
    let audio = context.audio()?;
    let desired = AudioSpecDesired {
        freq: Some(44_100),
        channels: Some(1),
        samples: None,
    };
    audio.open_playback(None, &desired, |spec| SquareWave {
        phase_inc: BEEP_HZ / spec.freq as f32,
        phase: 0.0,
        volume: 0.25,
    })
}

impl Renderer for DisplayDriver {
    fn render(&mut self, display: &DisplayBuffer) -> Result<(), String> {
        for (y, row) in display.buffer.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                self.screen.set_draw_color(match cell {
                    0 => UNLIT,
                    1 => LIT,
                    _ => return Err("Invalid (non-binary) pixel value".into()),
                });
                self.screen.fill_rect(Rect::new(
                    x as i32 * self.scale as i32,
                    y as i32 * self.scale as i32,
                    self.scale,
                    self.scale,
                ))?;
            }
        }
        self.screen.present();
        Ok(())
    }

    fn set_beep(&mut self, on: bool) {
        if on == self.beeping {
            return;
        }
        self.beeping = on;
        if let Some(device) = &self.beeper {
            if on {
                device.resume();
            } else {
                device.pause();
            }
        }
    }
}
