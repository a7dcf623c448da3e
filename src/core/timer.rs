use std::thread;
use std::time::{Duration, Instant};

use crate::consts;

pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep_until(&self, deadline: Instant);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        thread::sleep(deadline.saturating_duration_since(Instant::now()));
    }
}

#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    last_tick: Instant,
}

impl Timer {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_tick: start,
        }
    }

    pub fn sixty_hertz(start: Instant) -> Self {
        Self::new(Duration::from_secs(1) / consts::TIMER_HZ, start)
    }

    // Leftover time carries over to the next call.
    pub fn ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now.saturating_duration_since(self.last_tick) >= self.interval {
            self.last_tick += self.interval;
            ticks += 1;
        }
        ticks
    }
}
