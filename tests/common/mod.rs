//! Deterministic time source shared by the loop tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use circlebear_revolution::scheduler::Clock;

/// Clock that only moves when slept on or advanced by hand.
pub struct FakeClock {
    pub now: Rc<Cell<Duration>>,
    pub sleeps: Vec<Duration>,
    pub yields: u32,
    /// Added on top of every requested sleep.
    pub oversleep: Duration,
    pub fail_sleep: bool,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
            sleeps: Vec::new(),
            yields: 0,
            oversleep: Duration::ZERO,
            fail_sleep: false,
        }
    }

    /// Shared handle so a simulation can burn time during an update.
    pub fn time(&self) -> Rc<Cell<Duration>> {
        Rc::clone(&self.now)
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) -> io::Result<()> {
        if self.fail_sleep {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "woken early"));
        }
        self.sleeps.push(duration);
        self.now.set(self.now.get() + duration + self.oversleep);
        Ok(())
    }

    fn yield_now(&mut self) {
        self.yields += 1;
    }
}
