//! The run loop that owns a [`Processor`] and connects it to a display, an
//! input device and a real-time clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

use crate::consts;
use crate::core::processor::{self, CycleStatus, Processor};
use crate::core::ram::{DisplayBuffer, KeyboardBuffer};
use crate::core::timer::{Clock, SystemClock, Timer};
use crate::core::{Chip8Error, Quirks, Rom};

#[derive(Debug, thiserror::Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Machine(#[from] Chip8Error),

    #[error("Frontend failure: {0}")]
    Frontend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Continue,
    Quit,
}

pub trait Renderer {
    fn render(&mut self, display: &DisplayBuffer) -> Result<(), String>;

    fn set_beep(&mut self, _on: bool) {}
}

pub trait InputSource {
    fn poll(&mut self, keyboard: &mut KeyboardBuffer) -> Result<PollStatus, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Upper bound on instructions per second; 0 runs unthrottled.
    pub clock_hz: u32,
    pub lenient: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            clock_hz: consts::DEFAULT_CLOCK_HZ,
            lenient: false,
        }
    }
}

pub struct Emulator<R: Renderer, I: InputSource, C: Clock = SystemClock> {
    processor: Option<Processor>,
    renderer: R,
    input: I,
    clock: C,
    timer: Timer,
    config: EmulatorConfig,
    shutdown: Arc<AtomicBool>,
    cycles: u64,
}

impl<R: Renderer, I: InputSource> Emulator<R, I, SystemClock> {
    pub fn new(renderer: R, input: I, config: EmulatorConfig) -> Self {
        Emulator::with_clock(renderer, input, config, SystemClock)
    }
}

impl<R: Renderer, I: InputSource, C: Clock> Emulator<R, I, C> {
    pub fn with_clock(renderer: R, input: I, config: EmulatorConfig, clock: C) -> Self {
        let timer = Timer::sixty_hertz(clock.now());
        Emulator {
            processor: None,
            renderer,
            input,
            clock,
            timer,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
            cycles: 0,
        }
    }

    pub fn load(&mut self, rom: &Rom, quirks: Quirks, seed: Option<u64>) -> Result<(), Chip8Error> {
        self.processor = Some(processor::load(rom, quirks, seed)?);
        self.timer = Timer::sixty_hertz(self.clock.now());
        self.cycles = 0;
        Ok(())
    }

    pub fn processor(&self) -> Option<&Processor> {
        self.processor.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Flag that stops [`Emulator::run`] before its next cycle once set.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    // cycle, timers, render, poll
    pub fn step(&mut self) -> Result<CycleStatus, EmulatorError> {
        let processor = self.processor.as_mut().ok_or(Chip8Error::InvalidState)?;

        let status = match processor.cycle() {
            Ok(status) => status,
            Err(err) if self.config.lenient && err.is_program_fault() => {
                warn!("Skipping instruction at {:#05X}: {}", processor.pc, err);
                processor.step_over();
                CycleStatus::Continue
            }
            Err(err) => {
                error!("Halting at {:#05X}: {}", processor.pc, err);
                return Err(err.into());
            }
        };
        self.cycles += 1;

        processor.tick_timers(self.timer.ticks(self.clock.now()));
        self.renderer.set_beep(processor.sound_active());
        if processor.take_draw_flag() {
            self.renderer
                .render(&processor.display_buffer)
                .map_err(EmulatorError::Frontend)?;
        }

        let poll = self
            .input
            .poll(&mut processor.keyboard_buffer)
            .map_err(EmulatorError::Frontend)?;
        if poll == PollStatus::Quit {
            info!("Shutdown requested by input");
            self.shutdown.store(true, Ordering::SeqCst);
        }
        Ok(status)
    }

    pub fn run(&mut self) -> Result<(), EmulatorError> {
        let cycle_time = match self.config.clock_hz {
            0 => None,
            hz => Some(Duration::from_secs(1) / hz),
        };
        let mut next_cycle = self.clock.now();
        info!("Running at {} Hz", self.config.clock_hz);

        while !self.shutdown.load(Ordering::SeqCst) {
            self.step()?;

            if let Some(cycle_time) = cycle_time {
                next_cycle += cycle_time;
                let now = self.clock.now();
                if next_cycle > now {
                    self.clock.sleep_until(next_cycle);
                } else {
                    // Running behind; do not try to catch up with a burst.
                    next_cycle = now;
                }
            }
        }

        info!("Stopped after {} cycles", self.cycles);
        Ok(())
    }
}
