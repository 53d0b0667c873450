//! Fixed-period game loop.
//!
//! Each outer iteration drains input, runs one update and one render, then
//! sleeps off whatever is left of the target period.  Sleep overshoot is
//! carried into the next iteration.  When an iteration runs long the
//! deficit accumulates in `excess` and is paid back with update-only
//! catch-up ticks, at most `max_frame_skips` per iteration, so a long stall
//! lets simulation time fall behind rather than spin.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::GameError;

// ── Seams ─────────────────────────────────────────────────────────────────────

/// Time source for the loop.  Tests inject a fake one.
pub trait Clock {
    /// Monotonic time since some fixed origin.
    fn now(&mut self) -> Duration;
    fn sleep(&mut self, duration: Duration) -> io::Result<()>;
    fn yield_now(&mut self);
}

#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) -> io::Result<()> {
        thread::sleep(duration);
        Ok(())
    }

    fn yield_now(&mut self) {
        thread::yield_now();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// Regular tick, followed by a render.
    Frame,
    /// Update-only tick paying back an overrun.
    CatchUp,
}

/// What the loop drives.  All three hooks run on the loop's thread, so
/// the simulation is only ever touched from one timeline.
pub trait Simulation {
    fn process_input(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn update(&mut self, kind: TickKind);

    fn render(&mut self) -> Result<(), GameError> {
        Ok(())
    }
}

// ── Control handle ────────────────────────────────────────────────────────────

/// Shared run/pause flags.  Cheap to clone and safe to use from any thread.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
}

impl LoopHandle {
    /// Ask the loop to finish.  Seen at the next iteration boundary, which
    /// is at most one period away.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Keep looping and rendering but stop advancing the simulation.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn toggle_pause(&self) {
        let _ = self.paused.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub iterations: u64,
    pub frames: u64,
    /// Regular ticks that reached the simulation.
    pub ticks: u64,
    pub catch_up_ticks: u64,
    /// Largest catch-up burst seen in a single iteration.
    pub max_skips: u32,
    pub paused_iterations: u64,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Scheduler {
    period: Duration,
    max_frame_skips: u32,
    no_delays_per_yield: u32,
    handle: LoopHandle,
}

impl Scheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            period: config.target_period(),
            max_frame_skips: config.max_frame_skips,
            no_delays_per_yield: config.no_delays_per_yield.max(1),
            handle: LoopHandle::default(),
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until stopped.  Only a failing render ends the loop early.
    pub fn run<C, S>(&self, clock: &mut C, sim: &mut S) -> Result<LoopStats, GameError>
    where
        C: Clock,
        S: Simulation,
    {
        let period = as_nanos(self.period);
        let mut stats = LoopStats::default();
        let mut over_sleep: i64 = 0;
        let mut excess: i64 = 0;
        let mut no_delays: u32 = 0;

        info!("game loop starting, period {:?}", self.period);
        self.handle.start();
        let mut before = clock.now();

        while self.handle.is_running() {
            stats.iterations += 1;

            sim.process_input()?;
            if !self.handle.is_running() {
                break;
            }

            self.update(sim, TickKind::Frame, &mut stats);
            sim.render()?;
            stats.frames += 1;

            let after = clock.now();
            let sleep_time = period - as_nanos(after.saturating_sub(before)) - over_sleep;

            if sleep_time > 0 {
                no_delays = 0;
                match clock.sleep(Duration::from_nanos(sleep_time as u64)) {
                    Ok(()) => {
                        over_sleep = as_nanos(clock.now().saturating_sub(after)) - sleep_time;
                    }
                    Err(err) => {
                        warn!("loop sleep interrupted: {err}");
                        over_sleep = 0;
                    }
                }
            } else {
                excess -= sleep_time;
                over_sleep = 0;
                no_delays += 1;
                if no_delays >= self.no_delays_per_yield {
                    clock.yield_now();
                    no_delays = 0;
                }
            }

            before = clock.now();

            let mut skips = 0;
            while excess > period && skips < self.max_frame_skips {
                excess -= period;
                self.update(sim, TickKind::CatchUp, &mut stats);
                skips += 1;
            }
            if skips > 0 {
                debug!("caught up {skips} tick(s), {excess}ns still owed");
            }
            stats.max_skips = stats.max_skips.max(skips);
        }

        info!(
            "game loop stopped after {} iterations ({} ticks, {} catch-up)",
            stats.iterations, stats.ticks, stats.catch_up_ticks
        );
        Ok(stats)
    }

    fn update<S: Simulation>(&self, sim: &mut S, kind: TickKind, stats: &mut LoopStats) {
        if self.handle.is_paused() {
            if kind == TickKind::Frame {
                stats.paused_iterations += 1;
            }
            return;
        }
        sim.update(kind);
        match kind {
            TickKind::Frame => stats.ticks += 1,
            TickKind::CatchUp => stats.catch_up_ticks += 1,
        }
    }
}

fn as_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}
